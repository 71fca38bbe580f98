//! Reaction and cooling-channel identifiers.

use serde::{Deserialize, Serialize};

/// Two-body reactions of the primordial network, numbered as in Abel et al. (1997).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    /// H + e -> H+ + 2e
    K1,
    /// H+ + e -> H + γ
    K2,
    /// He + e -> He+ + 2e
    K3,
    /// He+ + e -> He + γ
    K4,
    /// He+ + e -> He++ + 2e
    K5,
    /// He++ + e -> He+ + γ
    K6,
    /// H + e -> H- + γ
    K7,
    /// H- + H -> H2 + e
    K8,
    /// H + H+ -> H2+ + γ
    K9,
    /// H2+ + H -> H2 + H+
    K10,
    /// H2 + H+ -> H2+ + H
    K11,
    /// H2 + e -> 2H + e
    K12,
    /// H2 + H -> 3H
    K13,
    /// H- + e -> H + 2e
    K14,
    /// H- + H -> 2H + e
    K15,
    /// H- + H+ -> 2H
    K16,
    /// H- + H+ -> H2+ + e
    K17,
    /// H2+ + e -> 2H
    K18,
    /// H2+ + H- -> H2 + H
    K19,
    /// H+ + D -> H + D+
    K50,
    /// H + D+ -> H+ + D
    K51,
    /// H2 + D+ -> HD + H+
    K52,
    /// HD + H+ -> H2 + D+
    K53,
}

impl Reaction {
    pub const ALL: [Reaction; Reaction::COUNT] = [
        Reaction::K1,
        Reaction::K2,
        Reaction::K3,
        Reaction::K4,
        Reaction::K5,
        Reaction::K6,
        Reaction::K7,
        Reaction::K8,
        Reaction::K9,
        Reaction::K10,
        Reaction::K11,
        Reaction::K12,
        Reaction::K13,
        Reaction::K14,
        Reaction::K15,
        Reaction::K16,
        Reaction::K17,
        Reaction::K18,
        Reaction::K19,
        Reaction::K50,
        Reaction::K51,
        Reaction::K52,
        Reaction::K53,
    ];

    pub const COUNT: usize = 23;

    /// Dense index in `0..COUNT`, matching the position in [`Reaction::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Lowest primordial chemistry level that needs this reaction.
    pub fn min_level(&self) -> u8 {
        match self {
            Reaction::K1
            | Reaction::K2
            | Reaction::K3
            | Reaction::K4
            | Reaction::K5
            | Reaction::K6 => 1,
            Reaction::K50 | Reaction::K51 | Reaction::K52 | Reaction::K53 => 3,
            _ => 2,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Reaction::K1 => "k1",
            Reaction::K2 => "k2",
            Reaction::K3 => "k3",
            Reaction::K4 => "k4",
            Reaction::K5 => "k5",
            Reaction::K6 => "k6",
            Reaction::K7 => "k7",
            Reaction::K8 => "k8",
            Reaction::K9 => "k9",
            Reaction::K10 => "k10",
            Reaction::K11 => "k11",
            Reaction::K12 => "k12",
            Reaction::K13 => "k13",
            Reaction::K14 => "k14",
            Reaction::K15 => "k15",
            Reaction::K16 => "k16",
            Reaction::K17 => "k17",
            Reaction::K18 => "k18",
            Reaction::K19 => "k19",
            Reaction::K50 => "k50",
            Reaction::K51 => "k51",
            Reaction::K52 => "k52",
            Reaction::K53 => "k53",
        }
    }

    /// Reactions needed up to and including `level`.
    pub fn up_to_level(level: u8) -> impl Iterator<Item = Reaction> {
        Self::ALL.into_iter().filter(move |r| r.min_level() <= level)
    }
}

/// Tabulated cooling coefficients.
///
/// Rate-per-pair channels are in erg cm^3 s^-1; the equilibrium fractions are
/// dimensionless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CoolingChannel {
    /// Collisional excitation of HI (× n_e n_HI)
    #[serde(rename = "ce_hi")]
    CeHI,
    /// Collisional excitation of HeII (× n_e n_HeII)
    #[serde(rename = "ce_heii")]
    CeHeII,
    /// Collisional ionization of HI (× n_e n_HI)
    #[serde(rename = "ci_hi")]
    CiHI,
    /// Collisional ionization of HeI (× n_e n_HeI)
    #[serde(rename = "ci_hei")]
    CiHeI,
    /// Collisional ionization of HeII (× n_e n_HeII)
    #[serde(rename = "ci_heii")]
    CiHeII,
    /// Recombination of HII (× n_e n_HII)
    #[serde(rename = "re_hii")]
    ReHII,
    /// Radiative recombination of HeII (× n_e n_HeII)
    #[serde(rename = "re_heii_radiative")]
    ReHeIIRadiative,
    /// Dielectronic recombination of HeII (× n_e n_HeII)
    #[serde(rename = "re_heii_dielectronic")]
    ReHeIIDielectronic,
    /// Recombination of HeIII (× n_e n_HeIII)
    #[serde(rename = "re_heiii")]
    ReHeIII,
    /// Free-free emission (× n_e (n_HII + n_HeII + 4 n_HeIII))
    #[serde(rename = "brem")]
    Bremsstrahlung,
    /// Low-density H2 rovibrational cooling (× n_H2 n_HI)
    #[serde(rename = "h2")]
    H2,
    /// Low-density HD rotational cooling (× n_HD n_HI)
    #[serde(rename = "hd")]
    HD,
    /// Metal-line cooling at solar metallicity (× n_H^2)
    #[serde(rename = "metal")]
    Metal,
    /// Primordial cooling in collisional ionization equilibrium (× n_H^2)
    #[serde(rename = "equilibrium")]
    Equilibrium,
    /// Equilibrium neutral hydrogen fraction
    #[serde(rename = "equilibrium_x_hi")]
    EquilibriumHI,
    /// Equilibrium HeI fraction of helium
    #[serde(rename = "equilibrium_x_hei")]
    EquilibriumHeI,
    /// Equilibrium HeII fraction of helium
    #[serde(rename = "equilibrium_x_heii")]
    EquilibriumHeII,
}

impl CoolingChannel {
    pub const ALL: [CoolingChannel; 17] = [
        CoolingChannel::CeHI,
        CoolingChannel::CeHeII,
        CoolingChannel::CiHI,
        CoolingChannel::CiHeI,
        CoolingChannel::CiHeII,
        CoolingChannel::ReHII,
        CoolingChannel::ReHeIIRadiative,
        CoolingChannel::ReHeIIDielectronic,
        CoolingChannel::ReHeIII,
        CoolingChannel::Bremsstrahlung,
        CoolingChannel::H2,
        CoolingChannel::HD,
        CoolingChannel::Metal,
        CoolingChannel::Equilibrium,
        CoolingChannel::EquilibriumHI,
        CoolingChannel::EquilibriumHeI,
        CoolingChannel::EquilibriumHeII,
    ];

    /// Channels evaluated for the non-equilibrium H/He network (level >= 1).
    pub const PRIMORDIAL: [CoolingChannel; 10] = [
        CoolingChannel::CeHI,
        CoolingChannel::CeHeII,
        CoolingChannel::CiHI,
        CoolingChannel::CiHeI,
        CoolingChannel::CiHeII,
        CoolingChannel::ReHII,
        CoolingChannel::ReHeIIRadiative,
        CoolingChannel::ReHeIIDielectronic,
        CoolingChannel::ReHeIII,
        CoolingChannel::Bremsstrahlung,
    ];

    /// Equilibrium fractions used for photoheating in tabulated mode.
    pub const EQUILIBRIUM_FRACTIONS: [CoolingChannel; 3] = [
        CoolingChannel::EquilibriumHI,
        CoolingChannel::EquilibriumHeI,
        CoolingChannel::EquilibriumHeII,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CoolingChannel::CeHI => "ce_hi",
            CoolingChannel::CeHeII => "ce_heii",
            CoolingChannel::CiHI => "ci_hi",
            CoolingChannel::CiHeI => "ci_hei",
            CoolingChannel::CiHeII => "ci_heii",
            CoolingChannel::ReHII => "re_hii",
            CoolingChannel::ReHeIIRadiative => "re_heii_radiative",
            CoolingChannel::ReHeIIDielectronic => "re_heii_dielectronic",
            CoolingChannel::ReHeIII => "re_heiii",
            CoolingChannel::Bremsstrahlung => "brem",
            CoolingChannel::H2 => "h2",
            CoolingChannel::HD => "hd",
            CoolingChannel::Metal => "metal",
            CoolingChannel::Equilibrium => "equilibrium",
            CoolingChannel::EquilibriumHI => "equilibrium_x_hi",
            CoolingChannel::EquilibriumHeI => "equilibrium_x_hei",
            CoolingChannel::EquilibriumHeII => "equilibrium_x_heii",
        }
    }
}

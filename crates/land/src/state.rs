//! Administrative region codes (Brazilian federative units).

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use agroreg_core::DomainError;

/// Two-letter federative unit code a parcel is located in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StateCode {
    Ac,
    Al,
    Ap,
    Am,
    Ba,
    Ce,
    Df,
    Es,
    Go,
    Ma,
    Mt,
    Ms,
    Mg,
    Pa,
    Pb,
    Pr,
    Pe,
    Pi,
    Rj,
    Rn,
    Rs,
    Ro,
    Rr,
    Sc,
    Sp,
    Se,
    To,
}

impl StateCode {
    pub const ALL: [StateCode; 27] = [
        StateCode::Ac,
        StateCode::Al,
        StateCode::Ap,
        StateCode::Am,
        StateCode::Ba,
        StateCode::Ce,
        StateCode::Df,
        StateCode::Es,
        StateCode::Go,
        StateCode::Ma,
        StateCode::Mt,
        StateCode::Ms,
        StateCode::Mg,
        StateCode::Pa,
        StateCode::Pb,
        StateCode::Pr,
        StateCode::Pe,
        StateCode::Pi,
        StateCode::Rj,
        StateCode::Rn,
        StateCode::Rs,
        StateCode::Ro,
        StateCode::Rr,
        StateCode::Sc,
        StateCode::Sp,
        StateCode::Se,
        StateCode::To,
    ];

    pub fn code(self) -> &'static str {
        match self {
            StateCode::Ac => "AC",
            StateCode::Al => "AL",
            StateCode::Ap => "AP",
            StateCode::Am => "AM",
            StateCode::Ba => "BA",
            StateCode::Ce => "CE",
            StateCode::Df => "DF",
            StateCode::Es => "ES",
            StateCode::Go => "GO",
            StateCode::Ma => "MA",
            StateCode::Mt => "MT",
            StateCode::Ms => "MS",
            StateCode::Mg => "MG",
            StateCode::Pa => "PA",
            StateCode::Pb => "PB",
            StateCode::Pr => "PR",
            StateCode::Pe => "PE",
            StateCode::Pi => "PI",
            StateCode::Rj => "RJ",
            StateCode::Rn => "RN",
            StateCode::Rs => "RS",
            StateCode::Ro => "RO",
            StateCode::Rr => "RR",
            StateCode::Sc => "SC",
            StateCode::Sp => "SP",
            StateCode::Se => "SE",
            StateCode::To => "TO",
        }
    }

    /// Full region name, for display.
    pub fn name(self) -> &'static str {
        match self {
            StateCode::Ac => "Acre",
            StateCode::Al => "Alagoas",
            StateCode::Ap => "Amapá",
            StateCode::Am => "Amazonas",
            StateCode::Ba => "Bahia",
            StateCode::Ce => "Ceará",
            StateCode::Df => "Distrito Federal",
            StateCode::Es => "Espírito Santo",
            StateCode::Go => "Goiás",
            StateCode::Ma => "Maranhão",
            StateCode::Mt => "Mato Grosso",
            StateCode::Ms => "Mato Grosso do Sul",
            StateCode::Mg => "Minas Gerais",
            StateCode::Pa => "Pará",
            StateCode::Pb => "Paraíba",
            StateCode::Pr => "Paraná",
            StateCode::Pe => "Pernambuco",
            StateCode::Pi => "Piauí",
            StateCode::Rj => "Rio de Janeiro",
            StateCode::Rn => "Rio Grande do Norte",
            StateCode::Rs => "Rio Grande do Sul",
            StateCode::Ro => "Rondônia",
            StateCode::Rr => "Roraima",
            StateCode::Sc => "Santa Catarina",
            StateCode::Sp => "São Paulo",
            StateCode::Se => "Sergipe",
            StateCode::To => "Tocantins",
        }
    }
}

impl core::fmt::Display for StateCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

/// Accepts the upper-case two-letter code only (`"SP"`, not `"sp"`).
impl FromStr for StateCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StateCode::ALL
            .into_iter()
            .find(|state| state.code() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown state code '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_parses_back() {
        for state in StateCode::ALL {
            assert_eq!(state.code().parse::<StateCode>().unwrap(), state);
        }
    }

    #[test]
    fn lower_case_and_unknown_codes_are_rejected() {
        assert!("sp".parse::<StateCode>().is_err());
        assert!("XX".parse::<StateCode>().is_err());
        assert!("SPP".parse::<StateCode>().is_err());
    }

    #[test]
    fn serde_matches_code() {
        for state in StateCode::ALL {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state.code()));
        }
    }

    #[test]
    fn name_is_human_readable() {
        assert_eq!(StateCode::Sp.name(), "São Paulo");
        assert_eq!(StateCode::Mg.to_string(), "MG");
    }
}

//! Account-position tables and payload layouts for the programs this
//! indexer understands: the Jupiter v6 aggregator and the SPL token program.

pub mod jupiter;
pub mod token_program;

use solana_pubkey::Pubkey;
use std::str::FromStr;

/// Well-formed registry of the program ids this indexer recognizes.
///
/// Parsing the base58 constants up front catches a bad constant at startup
/// instead of deep inside a batch.
pub fn known_programs() -> Vec<(Pubkey, &'static str)> {
    vec![
        (
            Pubkey::from_str(jupiter::PROGRAM_ID).expect("jupiter program id"),
            "JupiterV6",
        ),
        (
            Pubkey::from_str(token_program::PROGRAM_ID).expect("token program id"),
            "TokenProgram",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_parses() {
        let programs = known_programs();
        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].0.to_string(), jupiter::PROGRAM_ID);
        assert_eq!(programs[1].0.to_string(), token_program::PROGRAM_ID);
    }
}

use anyhow::Result;

use crate::cli::{AumCommands, Commands, PerformanceCommands, TransactionCommands};
use crate::commands::{self as cmd, Command};
use fundtrack::db::TransactionKind;

/// Convert clap `Commands` into the internal `commands::Command`, validating
/// amounts and dates on the way. Returns Err on invalid input.
pub fn to_internal_command(c: &Commands) -> Result<Command> {
    let command = match c {
        Commands::Buy { amount, date } => Command::Record {
            kind: TransactionKind::Buy,
            amount: cmd::parse_transaction_amount(amount)?,
            date: cmd::parse_date(date)?,
        },
        Commands::Sell { amount, date } => Command::Record {
            kind: TransactionKind::Sell,
            amount: cmd::parse_transaction_amount(amount)?,
            date: cmd::parse_date(date)?,
        },
        Commands::Transactions { action } => match action {
            TransactionCommands::List => Command::TransactionsList,
        },
        Commands::Aum { action } => match action {
            AumCommands::Add { amount, at } => Command::AumAdd {
                amount: cmd::parse_aum_amount(amount)?,
                at: at.map(cmd::parse_timestamp).transpose()?,
            },
            AumCommands::List => Command::AumList,
        },
        Commands::Performance { action } => match action {
            PerformanceCommands::Windows => Command::PerformanceWindows,
            PerformanceCommands::Twr => Command::PerformanceTwr,
        },
        Commands::Dashboard { public } => Command::Dashboard { public: *public },
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fundtrack::error::FundError;
    use rust_decimal_macros::dec;

    #[test]
    fn convert_buy_with_valid_input() {
        let c = Commands::Buy {
            amount: "20".to_string(),
            date: "2025-03-02".to_string(),
        };
        match to_internal_command(&c).expect("conversion failed") {
            Command::Record { kind, amount, date } => {
                assert_eq!(kind, TransactionKind::Buy);
                assert_eq!(amount, dec!(20));
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
            }
            other => panic!("unexpected converted result: {:?}", other),
        }
    }

    #[test]
    fn convert_sell_rejects_invalid_amount() {
        let c = Commands::Sell {
            amount: "-5".to_string(),
            date: "2025-03-02".to_string(),
        };
        let err = to_internal_command(&c).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FundError>(),
            Some(FundError::InvalidAmount(_))
        ));
    }

    #[test]
    fn convert_buy_rejects_missing_date() {
        let c = Commands::Buy {
            amount: "5".to_string(),
            date: String::new(),
        };
        assert!(to_internal_command(&c).is_err());
    }

    #[test]
    fn convert_aum_add_with_timestamp() {
        let c = Commands::Aum {
            action: AumCommands::Add {
                amount: "1500.25".to_string(),
                at: Some(1_700_000_000),
            },
        };
        match to_internal_command(&c).unwrap() {
            Command::AumAdd { amount, at } => {
                assert_eq!(amount, dec!(1500.25));
                assert_eq!(at.unwrap().timestamp(), 1_700_000_000);
            }
            other => panic!("unexpected converted result: {:?}", other),
        }
    }

    #[test]
    fn convert_dashboard_public() {
        let c = Commands::Dashboard { public: true };
        assert_eq!(
            to_internal_command(&c).unwrap(),
            Command::Dashboard { public: true }
        );
    }
}

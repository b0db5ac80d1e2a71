//! Inbound command surface - parsing and dispatch.
//!
//! This layer is transport-free: the front end (a chat framework, the local
//! console) is responsible for receiving text and tagging it with the
//! invoking user's identity; everything after that happens here. [`parse`]
//! turns a line into a typed [`Command`], [`dispatch`] runs it against the
//! stores and renders a plain-text reply. Errors propagate to the caller as
//! the distinct variants of [`crate::errors::Error`], never flattened.

/// Reply formatting helpers (amounts, transaction and debt lines)
pub mod format;

use crate::{
    core::{DebtBook, LedgerStore, TransactionPatch},
    entities::transaction::TransactionKind,
    errors::{Error, Result},
};
use format::{format_amount, format_debt_line, format_note, format_transaction_line};

/// How many recent transactions the summary reply shows.
const RECENT_LIMIT: u64 = 5;

/// A parsed chat command, already stripped of transport concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Record money coming in.
    Income {
        /// Amount in the smallest currency unit.
        amount: i64,
        /// Optional note.
        description: Option<String>,
    },
    /// Record money going out.
    Expense {
        /// Amount in the smallest currency unit.
        amount: i64,
        /// Optional note.
        description: Option<String>,
    },
    /// Show totals and recent transactions.
    Summary,
    /// Change fields on a recorded transaction (admin only).
    Edit {
        /// Target transaction.
        transaction_id: i64,
        /// The fields to change.
        patch: TransactionPatch,
    },
    /// Remove one transaction (admin only).
    Delete {
        /// Target transaction.
        transaction_id: i64,
    },
    /// Remove every transaction in the ledger (admin only).
    DeleteAll,
    /// Record a debt owed to the invoking user.
    DebtAdd {
        /// Who owes the money.
        debtor_name: String,
        /// Amount owed.
        amount: i64,
        /// Optional note.
        description: Option<String>,
    },
    /// List the invoking user's debts with their codes.
    DebtList,
    /// Settle a debt by its code.
    DebtSettle {
        /// The debt's short code.
        code: String,
    },
    /// Show usage help.
    Help,
}

/// Parses one line of input into a [`Command`].
///
/// Amounts accept thousands separators (`5,000`). Unknown commands, missing
/// arguments, and non-numeric amounts are rejected with `Error::BadCommand`.
pub fn parse(input: &str) -> Result<Command> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let Some((&head, args)) = tokens.split_first() else {
        return Err(bad("empty input"));
    };

    match head.to_ascii_lowercase().as_str() {
        "income" | "expense" => {
            let Some((&raw_amount, note)) = args.split_first() else {
                return Err(bad(format!(
                    "expected an amount, e.g. `{head} 5,000 salary`"
                )));
            };
            let amount = parse_amount(raw_amount)?;
            let description = join_nonempty(note);
            if head.eq_ignore_ascii_case("income") {
                Ok(Command::Income {
                    amount,
                    description,
                })
            } else {
                Ok(Command::Expense {
                    amount,
                    description,
                })
            }
        }
        "summary" => Ok(Command::Summary),
        "edit" => {
            let Some((&raw_id, fields)) = args.split_first() else {
                return Err(bad("expected a transaction id, e.g. `edit 12 amount=500`"));
            };
            Ok(Command::Edit {
                transaction_id: parse_id(raw_id)?,
                patch: parse_patch(fields)?,
            })
        }
        "delete" => match args.split_first() {
            Some((&"all", [])) => Ok(Command::DeleteAll),
            Some((&raw_id, [])) => Ok(Command::Delete {
                transaction_id: parse_id(raw_id)?,
            }),
            _ => Err(bad("expected `delete <id>` or `delete all`")),
        },
        "debt" => parse_debt(args),
        "help" | "start" => Ok(Command::Help),
        other => Err(bad(format!(
            "unknown command '{other}', try `help` for the list"
        ))),
    }
}

fn parse_debt(args: &[&str]) -> Result<Command> {
    match args.split_first() {
        Some((&"add", rest)) => {
            let [debtor_name, raw_amount, note @ ..] = rest else {
                return Err(bad("expected `debt add <name> <amount> [description]`"));
            };
            Ok(Command::DebtAdd {
                debtor_name: (*debtor_name).to_string(),
                amount: parse_amount(raw_amount)?,
                description: join_nonempty(note),
            })
        }
        Some((&"list", [])) => Ok(Command::DebtList),
        Some((&"settle", [code])) => Ok(Command::DebtSettle {
            code: (*code).to_string(),
        }),
        _ => Err(bad(
            "expected `debt add <name> <amount> [description]`, `debt list`, or `debt settle <code>`",
        )),
    }
}

/// `field=value` pairs for `edit`. A `description=` pair swallows the rest of
/// the line so notes may contain spaces.
fn parse_patch(fields: &[&str]) -> Result<TransactionPatch> {
    let mut patch = TransactionPatch::default();

    let mut index = 0;
    while index < fields.len() {
        let token = fields[index];
        let Some((key, value)) = token.split_once('=') else {
            return Err(bad(format!("expected field=value, got '{token}'")));
        };

        match key {
            "amount" => patch.amount = Some(parse_amount(value)?),
            "kind" => patch.kind = Some(parse_kind(value)?),
            "description" => {
                let mut text = value.to_string();
                for extra in &fields[index + 1..] {
                    text.push(' ');
                    text.push_str(extra);
                }
                patch.description = Some(text);
                break;
            }
            other => {
                return Err(bad(format!(
                    "unknown field '{other}', expected amount, kind, or description"
                )));
            }
        }
        index += 1;
    }

    Ok(patch)
}

fn parse_amount(raw: &str) -> Result<i64> {
    raw.replace(',', "")
        .parse()
        .map_err(|_| bad(format!("'{raw}' is not a valid amount")))
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| bad(format!("transaction id must be a number, got '{raw}'")))
}

fn parse_kind(raw: &str) -> Result<TransactionKind> {
    match raw.to_ascii_lowercase().as_str() {
        "income" => Ok(TransactionKind::Income),
        "expense" => Ok(TransactionKind::Expense),
        other => Err(bad(format!(
            "kind must be `income` or `expense`, got '{other}'"
        ))),
    }
}

fn join_nonempty(tokens: &[&str]) -> Option<String> {
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

fn bad(message: impl Into<String>) -> Error {
    Error::BadCommand {
        message: message.into(),
    }
}

/// Executes `command` on behalf of `user_id` and renders the reply.
///
/// The identity is attached by the front end; this function never guesses it.
pub async fn dispatch(
    ledger: &LedgerStore,
    debts: &DebtBook,
    user_id: i64,
    command: Command,
) -> Result<String> {
    match command {
        Command::Income {
            amount,
            description,
        } => {
            let recorded = ledger
                .record(user_id, TransactionKind::Income, amount, description)
                .await?;
            Ok(format!(
                "✅ Income #{} recorded: {}{}",
                recorded.id,
                format_amount(recorded.amount),
                format_note(recorded.description.as_deref())
            ))
        }
        Command::Expense {
            amount,
            description,
        } => {
            let recorded = ledger
                .record(user_id, TransactionKind::Expense, amount, description)
                .await?;
            Ok(format!(
                "✅ Expense #{} recorded: {}{}",
                recorded.id,
                format_amount(recorded.amount),
                format_note(recorded.description.as_deref())
            ))
        }
        Command::Summary => {
            let summary = ledger.summary(user_id).await?;
            let recent = ledger.recent(user_id, RECENT_LIMIT).await?;

            let mut reply = format!(
                "📊 Summary\nTotal income: {}\nTotal expense: {}\nNet balance: {}",
                format_amount(summary.total_income),
                format_amount(summary.total_expense),
                format_amount(summary.net_balance)
            );
            if !recent.is_empty() {
                reply.push_str("\n\nRecent transactions:");
                for entry in &recent {
                    reply.push('\n');
                    reply.push_str(&format_transaction_line(entry));
                }
            }
            Ok(reply)
        }
        Command::Edit {
            transaction_id,
            patch,
        } => {
            let updated = ledger.edit(user_id, transaction_id, patch).await?;
            Ok(format!("✅ Updated {}", format_transaction_line(&updated)))
        }
        Command::Delete { transaction_id } => {
            let removed = ledger.delete(user_id, transaction_id).await?;
            Ok(format!("✅ Deleted {}", format_transaction_line(&removed)))
        }
        Command::DeleteAll => {
            let removed = ledger.delete_all(user_id).await?;
            if removed == 0 {
                Ok("The ledger is already empty.".to_string())
            } else {
                Ok(format!("✅ Removed {removed} transactions."))
            }
        }
        Command::DebtAdd {
            debtor_name,
            amount,
            description,
        } => {
            let recorded = debts
                .add(user_id, &debtor_name, amount, description)
                .await?;
            Ok(format!(
                "✅ Debt [{}] recorded: {} owes {}{}",
                recorded.code,
                recorded.debtor_name,
                format_amount(recorded.amount),
                format_note(recorded.description.as_deref())
            ))
        }
        Command::DebtList => {
            let entries = debts.list(user_id).await?;
            if entries.is_empty() {
                return Ok("No debts recorded.".to_string());
            }

            let total: i64 = entries.iter().map(|d| d.amount).sum();
            let mut reply = format!("👥 Debts\nTotal owed: {}", format_amount(total));
            for entry in &entries {
                reply.push('\n');
                reply.push_str(&format_debt_line(entry));
            }
            Ok(reply)
        }
        Command::DebtSettle { code } => {
            let removed = debts.settle(user_id, &code).await?;
            Ok(format!(
                "✅ Debt [{}] settled: {} - {}",
                removed.code,
                removed.debtor_name,
                format_amount(removed.amount)
            ))
        }
        Command::Help => Ok(help_text()),
    }
}

fn help_text() -> String {
    "📒 tallybot commands\n\
    \n\
    Ledger:\n\
    • `income <amount> [description]` - record money coming in\n\
    • `expense <amount> [description]` - record money going out\n\
    • `summary` - totals and recent transactions\n\
    \n\
    Administration (admin only):\n\
    • `edit <id> amount=<n> kind=<income|expense> description=<text>` - change a transaction\n\
    • `delete <id>` - remove one transaction\n\
    • `delete all` - remove every transaction\n\
    \n\
    Debts:\n\
    • `debt add <name> <amount> [description]` - record a debt owed to you\n\
    • `debt list` - list your debts with their codes\n\
    • `debt settle <code>` - settle a debt\n\
    \n\
    Amounts are in the smallest currency unit and may use commas: `income 5,000 salary`."
        .to_string()
}

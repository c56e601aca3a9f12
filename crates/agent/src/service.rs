//! Banking service facade
//!
//! One struct ties the pipeline together: interpret a turn, route the
//! parsed command through risk and credential checks, and hand money
//! movement to the ledger engine. Transport is out of scope; callers get
//! typed outcomes and the shared error taxonomy.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use voice_banking_config::Settings;
use voice_banking_core::{
    validate_amount, Account, AccountProfile, BillCategory, CredentialPurpose, Error, Result,
    Transaction, TransactionKind,
};
use voice_banking_ledger::{AccountStore, AuthGate, LedgerEngine, RiskPolicy};
use voice_banking_nlu::Receiver;

use crate::orchestrator::{DialogOrchestrator, DialogState, IntentResult, ParsedCommand};

/// Balance report with its currency code.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceReport {
    pub balance: f64,
    pub currency: String,
}

/// What a routed voice command produced.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandOutcome {
    Executed {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        transaction_id: Option<Uuid>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new_balance: Option<f64>,
    },
    Pending {
        message: String,
    },
    NeedsInfo {
        missing: Vec<String>,
        message: String,
    },
    Cancelled {
        message: String,
    },
    Unrecognized {
        message: String,
    },
}

/// The application-facing banking service.
pub struct BankingService {
    store: Arc<dyn AccountStore>,
    engine: LedgerEngine,
    auth: AuthGate,
    risk: RiskPolicy,
    orchestrator: DialogOrchestrator,
    settings: Settings,
}

impl BankingService {
    pub fn new(store: Arc<dyn AccountStore>, settings: Settings) -> Self {
        Self {
            engine: LedgerEngine::new(store.clone()),
            auth: AuthGate::new(store.clone()),
            risk: RiskPolicy::new(settings.risk.max_transaction_amount),
            orchestrator: DialogOrchestrator::new(),
            store,
            settings,
        }
    }

    /// Look up the account, provisioning it with the configured opening
    /// balance on first contact.
    pub async fn ensure_account(
        &self,
        id: &str,
        name: &str,
        phone: &str,
    ) -> Result<AccountProfile> {
        if let Some(existing) = self.load(id).await? {
            return Ok(AccountProfile::from(&existing));
        }

        let account = Account::new(id, name, phone, self.settings.accounts.opening_balance);
        let profile = AccountProfile::from(&account);
        self.store.insert(account).await.map_err(|e| {
            warn!(error = %e, id, "account provisioning failed");
            Error::Internal
        })?;
        info!(id, phone, "account provisioned");
        Ok(profile)
    }

    pub async fn profile(&self, user_id: &str) -> Result<AccountProfile> {
        let account = self.load(user_id).await?.ok_or(Error::AccountNotFound)?;
        Ok(AccountProfile::from(&account))
    }

    /// Interpret a turn without executing anything. Always succeeds;
    /// "unknown" is a valid result.
    pub fn parse_intent(&self, text: &str) -> IntentResult {
        self.orchestrator.interpret(text)
    }

    pub async fn get_balance(&self, user_id: &str) -> Result<BalanceReport> {
        Ok(BalanceReport {
            balance: self.engine.balance(user_id).await?,
            currency: self.settings.accounts.currency.clone(),
        })
    }

    /// Execute a transfer. Without a PIN this returns a pending prompt and
    /// touches nothing; with one, the order is risk ceiling, credential,
    /// then the atomic ledger mutation.
    pub async fn transfer(
        &self,
        sender_id: &str,
        receiver: &Receiver,
        amount: f64,
        note: Option<String>,
        pin: Option<&str>,
    ) -> Result<CommandOutcome> {
        let amount = validate_amount(amount)?;
        let receiver_account = self.resolve_receiver(sender_id, receiver).await?;

        let Some(pin) = pin else {
            return Ok(CommandOutcome::Pending {
                message: format!(
                    "You are about to transfer \u{20b9}{amount:.2} to {}. \
                     Say your 4-digit transfer PIN to confirm.",
                    receiver_account.name
                ),
            });
        };

        self.risk.check(amount)?;
        self.auth
            .require(sender_id, CredentialPurpose::Transfer, pin)
            .await?;

        let receipt = self
            .engine
            .transfer(sender_id, &receiver_account.id, amount, note)
            .await?;

        info!(
            sender_id,
            receiver = %receiver_account.id,
            amount,
            tx = %receipt.transaction_id,
            "transfer executed"
        );
        Ok(CommandOutcome::Executed {
            message: format!(
                "Successfully transferred \u{20b9}{amount:.2} to {}",
                receiver_account.name
            ),
            transaction_id: Some(receipt.transaction_id),
            new_balance: Some(receipt.new_balance),
        })
    }

    /// Pay a utility bill. The category arrives as text at this boundary
    /// and unsupported names are rejected before any lookup. Same gating
    /// order as a transfer; the debit is one-sided.
    pub async fn pay_bill(
        &self,
        user_id: &str,
        category: &str,
        amount: f64,
        account_number: &str,
        pin: Option<&str>,
    ) -> Result<CommandOutcome> {
        let category: BillCategory = category.parse()?;
        let amount = validate_amount(amount)?;

        let Some(pin) = pin else {
            return Ok(CommandOutcome::Pending {
                message: format!(
                    "You are about to pay \u{20b9}{amount:.2} for the {category} bill \
                     on account {account_number}. Say your 4-digit transfer PIN to confirm."
                ),
            });
        };

        self.risk.check(amount)?;
        self.auth
            .require(user_id, CredentialPurpose::Transfer, pin)
            .await?;

        let note = format!("{category} bill for {account_number}");
        let receipt = self.engine.bill_pay(user_id, amount, note).await?;

        info!(user_id, %category, amount, tx = %receipt.transaction_id, "bill paid");
        Ok(CommandOutcome::Executed {
            message: format!(
                "Successfully paid \u{20b9}{amount:.2} for your {category} bill"
            ),
            transaction_id: Some(receipt.transaction_id),
            new_balance: Some(receipt.new_balance),
        })
    }

    pub async fn get_history(
        &self,
        user_id: &str,
        limit: Option<usize>,
        kind: Option<TransactionKind>,
    ) -> Result<Vec<Transaction>> {
        let limit = limit
            .unwrap_or(self.settings.history.default_limit)
            .min(self.settings.history.max_limit);
        self.engine.history(user_id, Some(limit), kind).await
    }

    pub async fn set_credential(
        &self,
        user_id: &str,
        purpose: CredentialPurpose,
        pin: &str,
    ) -> Result<()> {
        self.load(user_id).await?.ok_or(Error::AccountNotFound)?;
        self.auth.set_credential(user_id, purpose, pin).await
    }

    pub async fn verify_credential(
        &self,
        user_id: &str,
        purpose: CredentialPurpose,
        pin: &str,
    ) -> Result<bool> {
        self.auth.verify(user_id, purpose, pin).await
    }

    /// Interpret one voice turn and route it. Read-only intents execute
    /// immediately; money movement goes through the full gate.
    pub async fn handle_command(&self, user_id: &str, text: &str) -> Result<CommandOutcome> {
        let result = self.parse_intent(text);

        match result.state {
            DialogState::ReadyToExecute => match result.command {
                ParsedCommand::Balance => {
                    let report = self.get_balance(user_id).await?;
                    Ok(CommandOutcome::Executed {
                        message: format!(
                            "Your balance is \u{20b9}{:.2}",
                            report.balance
                        ),
                        transaction_id: None,
                        new_balance: Some(report.balance),
                    })
                }
                ParsedCommand::Transfer(draft) => {
                    let (Some(amount), Some(receiver), Some(pin)) =
                        (draft.amount, draft.receiver, draft.pin)
                    else {
                        // the state machine only reports ready when all
                        // three are present
                        return Err(Error::Internal);
                    };
                    self.transfer(user_id, &receiver, amount, None, Some(&pin))
                        .await
                }
                ParsedCommand::BillPay(draft) => {
                    let (Some(amount), Some(category), Some(account_number), Some(pin)) = (
                        draft.amount,
                        draft.category,
                        draft.account_number,
                        draft.pin,
                    ) else {
                        return Err(Error::Internal);
                    };
                    self.pay_bill(user_id, category.as_str(), amount, &account_number, Some(&pin))
                        .await
                }
                _ => Err(Error::Internal),
            },
            DialogState::PendingConfirmation => Ok(CommandOutcome::Pending {
                message: result.prompt.unwrap_or_default(),
            }),
            DialogState::NeedsInfo => Ok(CommandOutcome::NeedsInfo {
                missing: result.missing.iter().map(|m| m.to_string()).collect(),
                message: result.prompt.unwrap_or_default(),
            }),
            DialogState::Cancelled => Ok(CommandOutcome::Cancelled {
                message: result.prompt.unwrap_or_default(),
            }),
            DialogState::Unrecognized => Ok(CommandOutcome::Unrecognized {
                message: result.prompt.unwrap_or_default(),
            }),
        }
    }

    async fn load(&self, id: &str) -> Result<Option<Account>> {
        self.store.get(id).await.map_err(|e| {
            warn!(error = %e, id, "account load failed");
            Error::Internal
        })
    }

    /// Resolve the extracted receiver reference to a concrete account.
    /// Unresolved names fail here; a phone that maps back to the sender is
    /// a self-transfer.
    async fn resolve_receiver(&self, sender_id: &str, receiver: &Receiver) -> Result<Account> {
        let phone = match receiver {
            Receiver::Phone(phone) => phone,
            Receiver::Name(name) => {
                return Err(Error::ReceiverNotFound(name.clone()));
            }
        };

        let account = self
            .store
            .find_by_phone(phone)
            .await
            .map_err(|e| {
                warn!(error = %e, phone, "receiver lookup failed");
                Error::Internal
            })?
            .ok_or_else(|| Error::ReceiverNotFound(phone.clone()))?;

        if account.id == sender_id {
            return Err(Error::SelfTransfer);
        }
        Ok(account)
    }
}

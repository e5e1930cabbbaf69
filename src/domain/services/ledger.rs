use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::models::{
    member::Member,
    transaction::{ConsumeBreakdown, PaymentMethod, ProjectLine, Transaction},
};
use crate::domain::ports::{
    LedgerRepository, MemberRepository, ProjectRepository, TechnicianRepository,
};
use crate::error::AppError;
use tracing::info;

/// Rounds a currency amount to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone)]
pub struct RechargeRequest {
    pub amount: f64,
    pub bonus_amount: f64,
    pub technician_id: Option<String>,
    pub note: Option<String>,
}

/// The two consumption modes. The flat-amount path deliberately skips the
/// member discount: without catalog prices the supplied amount is taken as
/// already settled. It exists for callers predating itemized billing and is
/// deprecated in favor of `Itemized`.
#[derive(Debug, Clone)]
pub enum ConsumeMode {
    Itemized { lines: Vec<ProjectLine> },
    FlatAmount { amount: f64 },
}

#[derive(Debug, Clone)]
pub struct ConsumeRequest {
    pub mode: ConsumeMode,
    pub custom_amount: f64,
    pub technician_id: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub note: Option<String>,
}

/// The sole authority for changing a member's balance. Every mutation goes
/// through `recharge` or `consume`, which validate, compute the amounts and
/// hand balance update plus transaction append to the repository as one
/// atomic unit.
pub struct Ledger {
    members: Arc<dyn MemberRepository>,
    projects: Arc<dyn ProjectRepository>,
    technicians: Arc<dyn TechnicianRepository>,
    repo: Arc<dyn LedgerRepository>,
}

impl Ledger {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        projects: Arc<dyn ProjectRepository>,
        technicians: Arc<dyn TechnicianRepository>,
        repo: Arc<dyn LedgerRepository>,
    ) -> Self {
        Self {
            members,
            projects,
            technicians,
            repo,
        }
    }

    pub async fn recharge(
        &self,
        store_id: &str,
        member_id: &str,
        request: RechargeRequest,
    ) -> Result<(Member, Transaction), AppError> {
        if request.amount <= 0.0 || !request.amount.is_finite() {
            return Err(AppError::InvalidAmount(
                "Recharge amount must be greater than 0".into(),
            ));
        }
        if request.bonus_amount < 0.0 || !request.bonus_amount.is_finite() {
            return Err(AppError::InvalidAmount(
                "Bonus amount must not be negative".into(),
            ));
        }

        let member = self.require_member(store_id, member_id).await?;
        self.check_technician(store_id, request.technician_id.as_deref())
            .await?;

        let total = round2(request.amount + request.bonus_amount);
        let transaction = Transaction::recharge(
            store_id.to_string(),
            member.id.clone(),
            total,
            request.bonus_amount,
            request.technician_id,
            request.note,
        );

        let updated = self
            .repo
            .credit(store_id, &member.id, total, &transaction)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".into()))?;

        info!(
            member_id = %updated.id,
            amount = total,
            balance = updated.balance,
            "recharge committed"
        );

        Ok((updated, transaction))
    }

    pub async fn consume(
        &self,
        store_id: &str,
        member_id: &str,
        request: ConsumeRequest,
    ) -> Result<(Member, Transaction), AppError> {
        if request.custom_amount < 0.0 || !request.custom_amount.is_finite() {
            return Err(AppError::InvalidAmount(
                "Custom amount must not be negative".into(),
            ));
        }

        let member = self.require_member(store_id, member_id).await?;
        self.check_technician(store_id, request.technician_id.as_deref())
            .await?;

        let (total, breakdown, lines) = match &request.mode {
            ConsumeMode::Itemized { lines } => {
                let (original, grouped) = self.price_lines(store_id, lines).await?;
                let discounted = round2(original * member.discount);
                let final_amount = discounted + request.custom_amount;
                (
                    final_amount,
                    ConsumeBreakdown {
                        original,
                        discounted,
                        final_amount,
                        custom: request.custom_amount,
                        discount: member.discount,
                    },
                    grouped,
                )
            }
            ConsumeMode::FlatAmount { amount } => {
                if !amount.is_finite() {
                    return Err(AppError::InvalidAmount(
                        "Consumption amount must be greater than 0".into(),
                    ));
                }
                if *amount <= 0.0 && request.custom_amount <= 0.0 {
                    return Err(AppError::InvalidAmount(
                        "Consumption amount must be greater than 0".into(),
                    ));
                }
                // No catalog price is known here, so the member discount is
                // intentionally not applied.
                (
                    amount + request.custom_amount,
                    ConsumeBreakdown {
                        original: *amount,
                        discounted: *amount,
                        final_amount: *amount,
                        custom: request.custom_amount,
                        discount: member.discount,
                    },
                    Vec::new(),
                )
            }
        };

        if total <= 0.0 {
            return Err(AppError::InvalidAmount(
                "Consumption amount must be greater than 0".into(),
            ));
        }

        let transaction = Transaction::consume(
            store_id.to_string(),
            member.id.clone(),
            total,
            breakdown,
            lines,
            request.technician_id,
            request.payment_method.unwrap_or(PaymentMethod::VipBalance),
            request.note,
        );

        let updated = self
            .repo
            .debit(store_id, &member.id, total, &transaction)
            .await?
            .ok_or(AppError::InsufficientBalance)?;

        info!(
            member_id = %updated.id,
            amount = total,
            balance = updated.balance,
            "consumption committed"
        );

        Ok((updated, transaction))
    }

    async fn require_member(&self, store_id: &str, member_id: &str) -> Result<Member, AppError> {
        self.members
            .find_by_id(store_id, member_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".into()))
    }

    async fn check_technician(
        &self,
        store_id: &str,
        technician_id: Option<&str>,
    ) -> Result<(), AppError> {
        if let Some(id) = technician_id {
            self.technicians
                .find_by_id(store_id, id)
                .await?
                .ok_or_else(|| AppError::InvalidReference("Technician not found".into()))?;
        }
        Ok(())
    }

    /// Groups requested lines by project id, coerces quantities to >= 1 and
    /// resolves prices against the store catalog. Every referenced project
    /// must exist and belong to the store.
    async fn price_lines(
        &self,
        store_id: &str,
        lines: &[ProjectLine],
    ) -> Result<(f64, Vec<ProjectLine>), AppError> {
        let mut quantities: HashMap<String, i64> = HashMap::new();
        let mut order: Vec<String> = Vec::new();
        for line in lines {
            if line.project_id.is_empty() {
                continue;
            }
            let qty = if line.quantity > 0 { line.quantity } else { 1 };
            let entry = quantities.entry(line.project_id.clone()).or_insert(0);
            if *entry == 0 {
                order.push(line.project_id.clone());
            }
            *entry += qty;
        }

        if order.is_empty() {
            return Err(AppError::InvalidAmount(
                "Select a valid project or enter a custom amount".into(),
            ));
        }

        let found = self.projects.find_active_by_ids(store_id, &order).await?;
        if found.len() != order.len() {
            return Err(AppError::InvalidReference(
                "Project does not exist or belongs to another store".into(),
            ));
        }

        let prices: HashMap<&str, f64> = found.iter().map(|p| (p.id.as_str(), p.price)).collect();
        let mut original = 0.0;
        let mut grouped = Vec::with_capacity(order.len());
        for id in &order {
            let qty = quantities[id];
            // Resolved above; every id in `order` has a price.
            let price = prices[id.as_str()];
            original += price * qty as f64;
            grouped.push(ProjectLine {
                project_id: id.clone(),
                quantity: qty,
            });
        }

        Ok((original, grouped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_follows_currency_rounding() {
        assert_eq!(round2(80.0), 80.0);
        assert_eq!(round2(79.996), 80.0);
        assert_eq!(round2(33.333), 33.33);
        assert_eq!(round2(-1.234), -1.23);
    }

    #[test]
    fn discount_application_rounds_after_multiplication() {
        // 100 at 0.8 discount
        assert_eq!(round2(100.0 * 0.8), 80.0);
        // 99.99 at 0.33 discount
        assert_eq!(round2(99.99 * 0.33), 33.0);
    }
}

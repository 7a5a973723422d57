//! Bill summary: the derived per-person view and its exports.
//!
//! The plain-text layout, in order:
//!
//! ```text
//! Bill Summary
//! ============
//! Subtotal: $38.00 (2 items)
//! Tax (10%): $3.80
//! Total with tax: $41.80
//!
//! Items:
//! - Pizza: $30.00 (Alice)
//! - Beer: $8.00 (unassigned)
//!
//! Per person:
//! - Alice: $30.00 (with tax: $33.00)
//!
//! Unassigned: $8.00 (not included in any share)
//! ```
//!
//! The tax lines and the `with tax` suffix only appear when a rate is given;
//! the unassigned line only appears when some item has no assignees left.

use std::fmt;

use serde::Serialize;

use splitbill_domain::id::{ItemId, ParticipantId};
use splitbill_domain::money::{self, format_currency};

use crate::services::bill_ledger::BillLedger;

/// Snapshot of every derived figure of a ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillSummary {
    pub subtotal: f64,
    pub item_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<TaxLine>,
    pub items: Vec<ItemLine>,
    pub participants: Vec<ParticipantLine>,
    pub unassigned_total: f64,
}

/// Tax block, present only when a rate was requested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaxLine {
    pub rate_percent: f64,
    pub amount: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemLine {
    pub id: ItemId,
    pub name: String,
    pub price: f64,
    /// Resolved names; dangling ids appear as `"Unknown"`.
    pub assignees: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantLine {
    pub id: ParticipantId,
    pub name: String,
    pub share: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_with_tax: Option<f64>,
}

impl BillSummary {
    /// Render as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error. Non-finite amounts do not fail, they
    /// serialize as `null`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Whether per-person shares fall short of the subtotal.
    #[must_use]
    pub fn has_unassigned(&self) -> bool {
        self.unassigned_total > 0.0
    }
}

impl fmt::Display for BillSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bill Summary")?;
        writeln!(f, "============")?;
        let noun = if self.item_count == 1 { "item" } else { "items" };
        writeln!(
            f,
            "Subtotal: {} ({} {noun})",
            format_currency(self.subtotal),
            self.item_count
        )?;
        if let Some(tax) = &self.tax {
            writeln!(f, "Tax ({}%): {}", tax.rate_percent, format_currency(tax.amount))?;
            writeln!(f, "Total with tax: {}", format_currency(tax.total))?;
        }

        writeln!(f)?;
        writeln!(f, "Items:")?;
        if self.items.is_empty() {
            writeln!(f, "(none)")?;
        }
        for item in &self.items {
            let assignees = if item.assignees.is_empty() {
                "unassigned".to_string()
            } else {
                item.assignees.join(", ")
            };
            writeln!(f, "- {}: {} ({assignees})", item.name, format_currency(item.price))?;
        }

        writeln!(f)?;
        writeln!(f, "Per person:")?;
        if self.participants.is_empty() {
            writeln!(f, "(none)")?;
        }
        for participant in &self.participants {
            write!(f, "- {}: {}", participant.name, format_currency(participant.share))?;
            if let Some(with_tax) = participant.share_with_tax {
                write!(f, " (with tax: {})", format_currency(with_tax))?;
            }
            writeln!(f)?;
        }

        if self.has_unassigned() {
            writeln!(f)?;
            writeln!(
                f,
                "Unassigned: {} (not included in any share)",
                format_currency(self.unassigned_total)
            )?;
        }
        Ok(())
    }
}

impl<G> BillLedger<G> {
    /// Compute the summary, with tax figures when `tax_rate_percent` is set.
    #[must_use]
    pub fn summary(&self, tax_rate_percent: Option<f64>) -> BillSummary {
        let subtotal = self.total_bill();
        let tax = tax_rate_percent.map(|rate_percent| TaxLine {
            rate_percent,
            amount: money::tax_amount(subtotal, rate_percent),
            total: money::apply_tax(subtotal, rate_percent),
        });

        let items = self
            .items()
            .iter()
            .map(|item| ItemLine {
                id: item.id.clone(),
                name: item.name.clone(),
                price: item.price,
                assignees: self.assignee_names(item),
            })
            .collect();

        let participants = self
            .participants()
            .iter()
            .map(|participant| {
                let share = self.participant_share(&participant.id);
                ParticipantLine {
                    id: participant.id.clone(),
                    name: participant.name.clone(),
                    share,
                    share_with_tax: tax_rate_percent.map(|rate| money::apply_tax(share, rate)),
                }
            })
            .collect();

        BillSummary {
            subtotal,
            item_count: self.item_count(),
            tax,
            items,
            participants,
            unassigned_total: self.unassigned_total(),
        }
    }

    /// Plain-text report of [`summary`](Self::summary), ready for a
    /// clipboard or a terminal.
    #[must_use]
    pub fn export_summary(&self, tax_rate_percent: Option<f64>) -> String {
        self.summary(tax_rate_percent).to_string()
    }
}

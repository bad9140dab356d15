//! Plain-text rendering of drafts and quotes for the terminal.

use std::fmt;

use booking_core::calculations::{PLATFORM_FEE_PERCENT, PricingBreakdown, TAX_PERCENT};
use booking_core::models::{AddOnCatalog, BookingDraft, PaymentMethod};
use booking_core::notifications::NotificationCounts;

use crate::utils::{format_inr, opt_display};

/// The saved draft, one field per line.
pub struct DraftSummary<'a> {
    pub draft: &'a BookingDraft,
    pub catalog: &'a AddOnCatalog,
}

impl fmt::Display for DraftSummary<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let d = self.draft;
        if d.is_empty() {
            return write!(f, "No saved booking draft.");
        }

        writeln!(f, "Event type:       {}", opt_display(d.event_type.map(|t| t.label())))?;
        writeln!(f, "Guests:           {}", opt_display(d.guest_count))?;
        writeln!(
            f,
            "Budget:           {}",
            opt_display(d.budget_range.map(|b| format!(
                "{} - {}",
                format_inr(b.min.into()),
                format_inr(b.max.into())
            )))
        )?;
        writeln!(f, "Location:         {}", opt_display(d.location.map(|l| l.label())))?;
        writeln!(f, "Venue:            {}", opt_display(d.venue_address.as_deref()))?;
        writeln!(
            f,
            "Date:             {}",
            opt_display(d.event_date.map(|date| date.format("%A, %-d %B %Y")))
        )?;
        writeln!(f, "Time slot:        {}", opt_display(d.time_slot.map(|s| s.label())))?;
        writeln!(
            f,
            "Requirements:     {}",
            opt_display(d.detailed_requirements.as_deref())
        )?;

        let add_ons: Vec<&str> = d
            .selected_add_ons()
            .iter()
            .map(|id| self.catalog.get(id).map_or(id.as_str(), |a| a.name.as_str()))
            .collect();
        writeln!(
            f,
            "Add-ons:          {}",
            if add_ons.is_empty() { "—".to_string() } else { add_ons.join(", ") }
        )?;
        writeln!(f, "Images:           {}", d.inspiration_images().len())?;
        writeln!(
            f,
            "Special requests: {}",
            opt_display(d.special_requests.as_deref())
        )?;
        writeln!(
            f,
            "Payment:          {}",
            opt_display(d.payment_method.map(|m| m.name()))
        )?;
        writeln!(f, "Vendor:           {}", opt_display(d.vendor_id.as_deref()))?;
        write!(
            f,
            "Accepted:         terms {}, privacy {}",
            yes_no(d.accepted_terms),
            yes_no(d.accepted_privacy)
        )
    }
}

fn yes_no(flag: Option<bool>) -> &'static str {
    if flag == Some(true) { "yes" } else { "no" }
}

/// Header badges; kinds with nothing unread are left out.
pub struct NotificationBadges(pub NotificationCounts);

impl fmt::Display for NotificationBadges {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let counts = self.0;
        let mut badges = Vec::new();
        if let Some(n) = counts.bookings_badge() {
            badges.push(format!("bookings {n}"));
        }
        if let Some(n) = counts.messages_badge() {
            badges.push(format!("messages {n}"));
        }
        if badges.is_empty() {
            write!(f, "Notifications:    none")
        } else {
            write!(
                f,
                "Notifications:    {} ({})",
                counts.badge_total(),
                badges.join(", ")
            )
        }
    }
}

/// Itemized quote, as shown on the confirmation step.
pub struct QuoteSummary<'a> {
    pub breakdown: &'a PricingBreakdown,
    pub method: PaymentMethod,
}

impl fmt::Display for QuoteSummary<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let b = self.breakdown;
        writeln!(f, "Base amount:        {:>14}", format_inr(b.base_amount))?;
        writeln!(f, "Add-ons:            {:>14}", format_inr(b.add_on_cost))?;
        writeln!(f, "Subtotal:           {:>14}", format_inr(b.subtotal))?;
        writeln!(f, "GST ({TAX_PERCENT}%):          {:>14}", format_inr(b.tax))?;
        writeln!(
            f,
            "Platform fee ({PLATFORM_FEE_PERCENT}%):  {:>14}",
            format_inr(b.platform_fee)
        )?;
        if !b.discount.is_zero() {
            writeln!(
                f,
                "{} discount: {:>13}",
                self.method.name(),
                format!("-{}", format_inr(b.discount))
            )?;
        }
        write!(f, "Total:              {:>14}", format_inr(b.total))
    }
}

#[cfg(test)]
mod tests {
    use booking_core::calculations::PricingCalculator;
    use booking_core::models::{BudgetRange, EventType};

    use super::*;

    #[test]
    fn badges_skip_empty_kinds() {
        assert_eq!(
            NotificationBadges(NotificationCounts::new(0, 4)).to_string(),
            "Notifications:    4 (messages 4)"
        );
        assert_eq!(
            NotificationBadges(NotificationCounts::default()).to_string(),
            "Notifications:    none"
        );
    }

    #[test]
    fn empty_draft_says_so() {
        let catalog = AddOnCatalog::standard();
        let summary = DraftSummary {
            draft: &BookingDraft::default(),
            catalog: &catalog,
        };

        assert_eq!(summary.to_string(), "No saved booking draft.");
    }

    #[test]
    fn draft_summary_names_add_ons() {
        let catalog = AddOnCatalog::standard();
        let draft = BookingDraft {
            event_type: Some(EventType::Wedding),
            budget_range: Some(BudgetRange::new(50000, 200000)),
            selected_add_ons: Some(vec!["catering".to_string(), "fireworks".to_string()]),
            ..Default::default()
        };

        let text = DraftSummary {
            draft: &draft,
            catalog: &catalog,
        }
        .to_string();

        assert!(text.contains("₹50,000 - ₹2,00,000"));
        assert!(text.contains("fireworks"));
        assert!(text.contains("terms no, privacy no"));
    }

    #[test]
    fn quote_shows_discount_only_when_applied() {
        let draft = BookingDraft {
            budget_range: Some(BudgetRange::new(100000, 100000)),
            payment_method: Some(PaymentMethod::Cash),
            ..Default::default()
        };
        let breakdown = PricingCalculator::default().calculate(&draft);

        let text = QuoteSummary {
            breakdown: &breakdown,
            method: PaymentMethod::Cash,
        }
        .to_string();

        assert!(!text.contains("discount"));
        assert!(text.contains("₹1,20,000"));
    }
}

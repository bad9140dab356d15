use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an add-on's price scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceUnit {
    /// Charged once per booking.
    Flat,
    /// Charged once per guest.
    PerPerson,
}

/// An optional supplementary service offered in the Requirements step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOn {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub unit: PriceUnit,
}

impl AddOn {
    /// Cost of this add-on for the given number of guests.
    pub fn cost_for(
        &self,
        guest_count: u32,
    ) -> Decimal {
        match self.unit {
            PriceUnit::Flat => self.price,
            PriceUnit::PerPerson => self.price * Decimal::from(guest_count),
        }
    }
}

/// Price list for add-on services, keyed by add-on id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddOnCatalog {
    entries: Vec<AddOn>,
}

impl AddOnCatalog {
    pub fn new(entries: Vec<AddOn>) -> Self {
        Self { entries }
    }

    /// The marketplace's standard add-on offering.
    pub fn standard() -> Self {
        fn entry(
            id: &str,
            name: &str,
            description: &str,
            price: i64,
            unit: PriceUnit,
        ) -> AddOn {
            AddOn {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                price: Decimal::from(price),
                unit,
            }
        }

        Self::new(vec![
            entry(
                "decoration",
                "Premium Decoration",
                "Enhanced floral arrangements and themed decorations",
                15000,
                PriceUnit::Flat,
            ),
            entry(
                "photography",
                "Professional Photography",
                "Complete event coverage with edited photos",
                25000,
                PriceUnit::Flat,
            ),
            entry(
                "videography",
                "Videography Package",
                "HD video recording with highlight reel",
                30000,
                PriceUnit::Flat,
            ),
            entry(
                "catering",
                "Premium Catering",
                "Multi-cuisine buffet with live counters",
                800,
                PriceUnit::PerPerson,
            ),
            entry(
                "music",
                "Live Music Band",
                "Professional musicians for entertainment",
                20000,
                PriceUnit::Flat,
            ),
            entry(
                "lighting",
                "Special Lighting",
                "Ambient and decorative lighting setup",
                12000,
                PriceUnit::Flat,
            ),
        ])
    }

    pub fn get(
        &self,
        id: &str,
    ) -> Option<&AddOn> {
        self.entries.iter().find(|a| a.id == id)
    }

    pub fn entries(&self) -> &[AddOn] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn standard_catalog_has_six_entries() {
        assert_eq!(AddOnCatalog::standard().entries().len(), 6);
    }

    #[test]
    fn catering_is_priced_per_person() {
        let catalog = AddOnCatalog::standard();
        let catering = catalog.get("catering").unwrap();

        assert_eq!(catering.unit, PriceUnit::PerPerson);
        assert_eq!(catering.cost_for(100), dec!(80000));
    }

    #[test]
    fn flat_add_on_ignores_guest_count() {
        let catalog = AddOnCatalog::standard();
        let photography = catalog.get("photography").unwrap();

        assert_eq!(photography.cost_for(0), dec!(25000));
        assert_eq!(photography.cost_for(500), dec!(25000));
    }

    #[test]
    fn unknown_id_is_absent() {
        assert!(AddOnCatalog::standard().get("fireworks").is_none());
    }
}

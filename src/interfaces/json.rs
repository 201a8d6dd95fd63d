use crate::domain::payroll::RateCard;
use crate::error::Result;
use std::io::Read;

/// Loads a JSON array of rate cards and validates each one.
pub fn read_rate_cards<R: Read>(source: R) -> Result<Vec<RateCard>> {
    let cards: Vec<RateCard> = serde_json::from_reader(source)?;
    for card in &cards {
        card.validate()?;
    }
    Ok(cards)
}

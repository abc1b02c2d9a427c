//! Edits applied to a presenter's working copy, and validation before it is dispatched.

use chrono::{DateTime, Utc};
use shared::domain::{PointDetails, PointType};

use crate::{catalog::Catalog, error::BoardError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    /// Changing the type drops every selected offer.
    SetType(PointType),
    SetDestination(String),
    SetDates {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
    SetBasePrice(u32),
    ToggleOffer {
        title: String,
    },
}

pub(crate) fn apply_edit(
    draft: &mut PointDetails,
    edit: DraftEdit,
    catalog: &Catalog,
) -> Result<(), BoardError> {
    match edit {
        DraftEdit::SetType(point_type) => {
            if draft.point_type != point_type {
                draft.point_type = point_type;
                draft.offers.clear();
            }
        }
        DraftEdit::SetDestination(name) => {
            if !catalog.has_destination(&name) {
                return Err(BoardError::InvalidDraft(format!(
                    "unknown destination '{name}'"
                )));
            }
            draft.destination = name;
        }
        DraftEdit::SetDates { from, to } => {
            draft.date_from = from;
            draft.date_to = to;
        }
        DraftEdit::SetBasePrice(price) => draft.base_price = price,
        DraftEdit::ToggleOffer { title } => {
            if draft.has_offer(&title) {
                draft.offers.retain(|offer| offer.title != title);
            } else {
                let offer = catalog
                    .offers_for(draft.point_type)
                    .iter()
                    .find(|offer| offer.title == title)
                    .ok_or_else(|| {
                        BoardError::InvalidDraft(format!(
                            "offer '{title}' is not available for {}",
                            draft.point_type.label()
                        ))
                    })?;
                draft.offers.push(offer.clone());
            }
        }
    }
    Ok(())
}

/// Moves a working copy from `base` onto a newer confirmed value. Fields the user left untouched
/// take the confirmed value; edited fields are kept.
pub(crate) fn rebase(draft: &mut PointDetails, base: &PointDetails, confirmed: &PointDetails) {
    if draft.point_type == base.point_type {
        draft.point_type = confirmed.point_type;
    }
    if draft.destination == base.destination {
        draft.destination = confirmed.destination.clone();
    }
    if draft.date_from == base.date_from {
        draft.date_from = confirmed.date_from;
    }
    if draft.date_to == base.date_to {
        draft.date_to = confirmed.date_to;
    }
    if draft.base_price == base.base_price {
        draft.base_price = confirmed.base_price;
    }
    if draft.offers == base.offers {
        draft.offers = confirmed.offers.clone();
    }
    if draft.is_favorite == base.is_favorite {
        draft.is_favorite = confirmed.is_favorite;
    }
}

pub(crate) fn validate(draft: &PointDetails, catalog: &Catalog) -> Result<(), BoardError> {
    if draft.date_from > draft.date_to {
        return Err(BoardError::InvalidDraft(
            "end date is before start date".to_string(),
        ));
    }
    if !catalog.has_destination(&draft.destination) {
        return Err(BoardError::InvalidDraft(format!(
            "unknown destination '{}'",
            draft.destination
        )));
    }
    let available = catalog.offers_for(draft.point_type);
    if let Some(offer) = draft
        .offers
        .iter()
        .find(|offer| !available.contains(offer))
    {
        return Err(BoardError::InvalidDraft(format!(
            "offer '{}' is not available for {}",
            offer.title,
            draft.point_type.label()
        )));
    }
    Ok(())
}

mod offer;
pub use offer::{OFFER_LABEL_NAMES, Offer, OfferId};

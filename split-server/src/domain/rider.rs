//! Rider and fare configuration.

use serde::Serialize;

/// Seating class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TravelClass {
    First,
    #[default]
    Second,
}

impl TravelClass {
    /// Parse from the numeric class (1 or 2). Anything else is second class.
    pub fn from_number(n: u8) -> Self {
        match n {
            1 => TravelClass::First,
            _ => TravelClass::Second,
        }
    }
}

/// Discount level of a BahnCard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BahnCardDiscount {
    Percent25,
    Percent50,
    Percent100,
}

impl BahnCardDiscount {
    /// Maps a discount percentage onto a card. Only 25, 50 and 100 exist.
    pub fn from_percent(percent: u8) -> Option<Self> {
        match percent {
            25 => Some(BahnCardDiscount::Percent25),
            50 => Some(BahnCardDiscount::Percent50),
            100 => Some(BahnCardDiscount::Percent100),
            _ => None,
        }
    }

    pub fn percent(&self) -> u8 {
        match self {
            BahnCardDiscount::Percent25 => 25,
            BahnCardDiscount::Percent50 => 50,
            BahnCardDiscount::Percent100 => 100,
        }
    }
}

/// A loyalty/discount card held by the rider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LoyaltyCard {
    pub discount: BahnCardDiscount,
    pub class: TravelClass,
}

/// Fare-relevant facts about the rider. An input to the analysis, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct RiderConfiguration {
    pub loyalty_card: Option<LoyaltyCard>,
    pub age: Option<u8>,
    pub travel_class: TravelClass,
    /// Rider owns the region-wide flat-rate ticket (Deutschlandticket).
    pub has_flat_ticket: bool,
}

impl RiderConfiguration {
    /// Sets the BahnCard by percentage; unknown percentages mean no card.
    /// The card's class follows the travel class.
    pub fn with_bahncard(mut self, percent: u8) -> Self {
        self.loyalty_card = BahnCardDiscount::from_percent(percent).map(|discount| LoyaltyCard {
            discount,
            class: self.travel_class,
        });
        self
    }

    pub fn with_travel_class(mut self, class: TravelClass) -> Self {
        self.travel_class = class;
        if let Some(card) = self.loyalty_card.as_mut() {
            card.class = class;
        }
        self
    }

    pub fn with_age(mut self, age: u8) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_flat_ticket(mut self, has_flat_ticket: bool) -> Self {
        self.has_flat_ticket = has_flat_ticket;
        self
    }
}

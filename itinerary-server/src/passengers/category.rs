//! Fare categories.
//!
//! A passenger's category is a pure function of what they have paid
//! recently, recomputed after every committed itinerary.

use std::fmt;

/// Spend above which a passenger becomes `Frequent`.
const FREQUENT_THRESHOLD: f64 = 250.0;

/// Spend above which a passenger becomes `Special`.
const SPECIAL_THRESHOLD: f64 = 2500.0;

/// Passenger fare category, deciding the discount on new itineraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    /// Full fare.
    #[default]
    Normal,
    /// 15% off.
    Frequent,
    /// 50% off.
    Special,
}

impl Category {
    /// Category earned by a given recent spend.
    ///
    /// # Examples
    ///
    /// ```
    /// use itinerary_server::passengers::Category;
    ///
    /// assert_eq!(Category::for_recent_spend(0.0), Category::Normal);
    /// assert_eq!(Category::for_recent_spend(250.0), Category::Normal);
    /// assert_eq!(Category::for_recent_spend(250.01), Category::Frequent);
    /// assert_eq!(Category::for_recent_spend(2500.01), Category::Special);
    /// ```
    pub fn for_recent_spend(spend: f64) -> Self {
        if spend > SPECIAL_THRESHOLD {
            Category::Special
        } else if spend > FREQUENT_THRESHOLD {
            Category::Frequent
        } else {
            Category::Normal
        }
    }

    /// Multiplier applied to an itinerary's price.
    pub fn discount(self) -> f64 {
        match self {
            Category::Normal => 1.0,
            Category::Frequent => 0.85,
            Category::Special => 0.5,
        }
    }

    /// Upper-case label.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Normal => "NORMAL",
            Category::Frequent => "FREQUENT",
            Category::Special => "SPECIAL",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

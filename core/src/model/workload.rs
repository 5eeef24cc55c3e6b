use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthBucket {
    pub month: String,
    pub hours: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct YearBucket {
    pub year: String,
    pub months: Vec<MonthBucket>,
}

impl YearBucket {
    pub fn new(year: String) -> Self {
        Self {
            year,
            months: Vec::new(),
        }
    }

    pub fn month(&self, month: &str) -> Option<&MonthBucket> {
        self.months.iter().find(|m| m.month == month)
    }

    /// Finds the bucket for `month`, appending an empty one if it is new.
    pub fn month_mut_or_insert(&mut self, month: &str) -> &mut MonthBucket {
        let pos = match self.months.iter().position(|m| m.month == month) {
            Some(pos) => pos,
            None => {
                self.months.push(MonthBucket {
                    month: month.to_string(),
                    hours: 0.0,
                });
                self.months.len() - 1
            }
        };
        &mut self.months[pos]
    }
}

/// The total of one (year, month) bucket as seen right after an update.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BucketTotal {
    pub year: String,
    pub month: String,
    pub hours: f64,
}

/// Aggregated hours of a single trainer, keyed by year then month.
///
/// Years and months keep the order in which they were first seen.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrainerWorkload {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub active: bool,
    pub years: Vec<YearBucket>,
}

impl TrainerWorkload {
    pub fn new(username: String, first_name: String, last_name: String, active: bool) -> Self {
        Self {
            username,
            first_name,
            last_name,
            active,
            years: Vec::new(),
        }
    }

    pub fn year(&self, year: &str) -> Option<&YearBucket> {
        self.years.iter().find(|y| y.year == year)
    }

    fn year_mut_or_insert(&mut self, year: &str) -> &mut YearBucket {
        let pos = match self.years.iter().position(|y| y.year == year) {
            Some(pos) => pos,
            None => {
                self.years.push(YearBucket::new(year.to_string()));
                self.years.len() - 1
            }
        };
        &mut self.years[pos]
    }

    pub fn hours(&self, year: &str, month: &str) -> Option<f64> {
        self.year(year).and_then(|y| y.month(month)).map(|m| m.hours)
    }

    /// Adds `delta` hours to the (year, month) bucket, creating it if needed.
    /// The total is floored at zero. Returns the new total.
    pub fn apply(&mut self, year: &str, month: &str, delta: f64) -> f64 {
        let bucket = self.year_mut_or_insert(year).month_mut_or_insert(month);
        bucket.hours = (bucket.hours + delta).max(0.0);
        bucket.hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trainer() -> TrainerWorkload {
        TrainerWorkload::new(
            "john.doe".to_string(),
            "John".to_string(),
            "Doe".to_string(),
            true,
        )
    }

    #[test]
    fn test_apply_creates_buckets_lazily() {
        let mut t = trainer();
        assert!(t.years.is_empty());

        assert_eq!(t.apply("2024", "MARCH", 2.0), 2.0);
        assert_eq!(t.years.len(), 1);
        assert_eq!(t.years[0].months.len(), 1);
        assert_eq!(t.hours("2024", "MARCH"), Some(2.0));
    }

    #[test]
    fn test_apply_accumulates_and_clamps() {
        let mut t = trainer();
        t.apply("2024", "MARCH", 1.0);
        assert_eq!(t.apply("2024", "MARCH", 1.5), 2.5);
        assert_eq!(t.apply("2024", "MARCH", -10.0), 0.0);
        // First-ever write with a negative delta floors as well
        assert_eq!(t.apply("2024", "APRIL", -1.0), 0.0);
        assert_eq!(t.hours("2024", "APRIL"), Some(0.0));
    }

    #[test]
    fn test_first_seen_order_is_kept() {
        let mut t = trainer();
        t.apply("2025", "MARCH", 1.0);
        t.apply("2024", "JUNE", 1.0);
        t.apply("2024", "FEBRUARY", 1.0);
        t.apply("2025", "JANUARY", 1.0);

        let years: Vec<&str> = t.years.iter().map(|y| y.year.as_str()).collect();
        assert_eq!(years, vec!["2025", "2024"]);
        let months_2024: Vec<&str> = t.years[1].months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months_2024, vec!["JUNE", "FEBRUARY"]);
    }

    #[test]
    fn test_month_lookup_is_case_sensitive() {
        let mut t = trainer();
        t.apply("2024", "AUGUST", 3.0);
        assert_eq!(t.hours("2024", "AUGUST"), Some(3.0));
        assert_eq!(t.hours("2024", "august"), None);
        assert_eq!(t.hours("2023", "AUGUST"), None);
    }
}

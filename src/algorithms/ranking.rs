use std::cmp::Ordering;

use crate::models::{Batch, Minutes, Money};

/// Trips shorter than this still count as one minute when scoring
const MIN_SCORED_MINUTES: Minutes = 1.0;

/// Earnings per minute of estimated trip time
pub fn efficiency_score(total_earnings: Money, estimated_time: Minutes) -> f64 {
    total_earnings / estimated_time.max(MIN_SCORED_MINUTES)
}

/// Sorts batches by descending efficiency score.
///
/// The sort is stable: batches with equal scores keep the order in which they
/// were built.
pub fn rank_batches(batches: &mut [Batch]) {
    batches.sort_by(|a, b| {
        b.efficiency_score
            .partial_cmp(&a.efficiency_score)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BatchKind;

    fn batch(id: &str, kind: BatchKind, total_earnings: Money, estimated_time: Minutes) -> Batch {
        Batch {
            id: id.to_string(),
            kind,
            orders: vec![],
            route: vec![],
            total_distance_km: estimated_time / 2.0,
            estimated_time_minutes: estimated_time,
            total_earnings,
            efficiency_score: efficiency_score(total_earnings, estimated_time),
        }
    }

    #[test]
    fn test_short_trips_scored_per_minute() {
        assert_eq!(efficiency_score(6.0, 0.0), 6.0);
        assert_eq!(efficiency_score(6.0, 0.5), 6.0);
        assert_eq!(efficiency_score(6.0, 3.0), 2.0);
    }

    #[test]
    fn test_rank_descending() {
        let mut batches = vec![
            batch("slow", BatchKind::Restaurant, 5.0, 20.0),
            batch("fast", BatchKind::Restaurant, 5.0, 5.0),
            batch("mid", BatchKind::CrossRestaurant, 5.0, 10.0),
        ];

        rank_batches(&mut batches);

        let ids: Vec<&str> = batches.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["fast", "mid", "slow"]);
    }

    #[test]
    fn test_rank_keeps_construction_order_on_ties() {
        let mut batches = vec![
            batch("r1", BatchKind::Restaurant, 4.0, 8.0),
            batch("r2", BatchKind::Restaurant, 2.0, 4.0),
            batch("x1", BatchKind::CrossRestaurant, 1.0, 2.0),
            batch("best", BatchKind::CrossRestaurant, 9.0, 3.0),
        ];

        rank_batches(&mut batches);

        let ids: Vec<&str> = batches.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["best", "r1", "r2", "x1"]);
    }
}

//! Tests for shaping distribution across a row budget

#[cfg(test)]
mod tests {
    use knitgen::math::shaping::{ShapingDirection, ShapingMode, plan_shaping};

    // Tests intervals are even and the last event lands on the last row
    // Verified by lengthening the first intervals instead of the last
    #[test]
    fn test_even_distribution_ends_on_last_row() {
        let plan = plan_shaping(60, 80, 45, 2);

        assert_eq!(plan.mode, ShapingMode::Even);
        assert_eq!(plan.direction, ShapingDirection::Increase);
        assert_eq!(plan.event_count(), 10);
        assert_eq!(plan.last_row(), 45);
        assert_eq!(plan.final_count(), 80);

        let offsets: Vec<u32> = plan.events.iter().map(|event| event.row_offset).collect();
        assert_eq!(offsets, vec![4, 8, 12, 16, 20, 25, 30, 35, 40, 45]);
        assert_eq!(plan.step.rounded_result, 4);
        assert!(plan.step.rounding_note.is_some());
    }

    // Tests an odd stitch difference puts the remainder on the final event
    // Verified by rounding the event count down
    #[test]
    fn test_remainder_on_final_event() {
        let plan = plan_shaping(100, 93, 20, 2);

        assert_eq!(plan.event_count(), 4);
        let deltas: Vec<i64> = plan.events.iter().map(|event| event.delta).collect();
        assert_eq!(deltas, vec![-2, -2, -2, -1]);
        assert_eq!(plan.final_count(), 93);
    }

    // Tests no shaping when counts match
    // Verified by emitting a zero-delta event
    #[test]
    fn test_straight_plan() {
        let plan = plan_shaping(88, 88, 30, 2);

        assert_eq!(plan.mode, ShapingMode::Straight);
        assert_eq!(plan.direction, ShapingDirection::Straight);
        assert!(plan.events.is_empty());
        assert_eq!(plan.last_row(), 0);
        assert_eq!(plan.final_count(), 88);
    }

    // Tests zero rows collapses everything into one immediate event
    // Verified by returning an empty plan for zero rows
    #[test]
    fn test_immediate_when_no_rows() {
        let plan = plan_shaping(50, 40, 0, 2);

        assert_eq!(plan.mode, ShapingMode::Immediate);
        assert_eq!(plan.events.len(), 1);
        assert_eq!(plan.events.first().map(|event| event.delta), Some(-10));
        assert_eq!(plan.final_count(), 40);
        assert!(plan.step.rounding_note.is_some());
    }

    // Tests more events than rows compresses onto every row
    // Verified by dropping the extra events
    #[test]
    fn test_every_row_compression() {
        let plan = plan_shaping(10, 40, 6, 2);

        assert_eq!(plan.mode, ShapingMode::EveryRow);
        assert_eq!(plan.events.len(), 6);
        assert_eq!(plan.last_row(), 6);
        assert_eq!(plan.final_count(), 40);
        assert!(plan.events.iter().all(|event| event.delta > 0));
    }

    // Tests a single edge per event for one-sided shaping
    // Verified by defaulting edges to two
    #[test]
    fn test_single_edge_shaping() {
        let plan = plan_shaping(54, 47, 14, 1);

        assert_eq!(plan.event_count(), 7);
        assert!(plan.events.iter().all(|event| event.delta == -1));
        assert_eq!(plan.last_row(), 14);
    }

    // Tests segments group equal intervals and cover the shaped rows
    // Verified by merging segments with different intervals
    #[test]
    fn test_segments() {
        let plan = plan_shaping(60, 80, 45, 2);
        let segments = plan.segments();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments.first().map(|s| (s.interval, s.repeats)), Some((4, 5)));
        assert_eq!(segments.last().map(|s| (s.interval, s.repeats)), Some((5, 5)));
        assert_eq!(segments.iter().map(|s| s.rows()).sum::<u32>(), 45);
    }

    // Tests splitting keeps every event and rebases the second half
    // Verified by leaving second-half offsets absolute
    #[test]
    fn test_split_at() {
        let plan = plan_shaping(64, 288, 57, 8);
        let (first, second) = plan.split_at(20);

        assert_eq!(first.available_rows, 20);
        assert_eq!(second.available_rows, 37);
        assert_eq!(first.event_count() + second.event_count(), plan.event_count());
        assert_eq!(first.end_count, second.start_count);
        assert_eq!(second.final_count(), 288);
        assert!(first.events.iter().all(|event| event.row_offset <= 20));
        assert!(second.events.iter().all(|event| (1..=37).contains(&event.row_offset)));
    }

    // Tests zero or negative edges are treated as one
    // Verified by dividing by the raw edge count
    #[test]
    fn test_edges_floor_at_one() {
        let plan = plan_shaping(20, 24, 8, 0);
        assert_eq!(plan.edges_per_step, 1);
        assert_eq!(plan.event_count(), 4);
    }
}

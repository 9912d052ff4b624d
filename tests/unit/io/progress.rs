//! Tests for progress tracking across request batches

#[cfg(test)]
mod tests {
    use knitgen::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use knitgen::io::progress::{ProgressManager, STAGES};
    use std::path::Path;

    fn run_batch(pm: &mut ProgressManager, count: usize) {
        pm.initialize(count);
        for i in 0..count {
            pm.start_file(i, Path::new(&format!("request{i}.json")));
            for stage in 1..STAGES.len() {
                pm.advance(i, stage);
            }
            pm.complete_file(i);
        }
        pm.finish();
    }

    // Tests the stage list ends in a completed state
    // Verified by reordering the stages
    #[test]
    fn test_stages() {
        assert_eq!(STAGES.first(), Some(&"reading"));
        assert_eq!(STAGES.last(), Some(&"done"));
    }

    // Tests ProgressManager construction and default
    // Verified by setting wrong initial state
    #[test]
    fn test_progress_manager_new() {
        let pm = ProgressManager::new();
        assert_eq!(pm.file_count(), 0);
        assert_eq!(ProgressManager::default().file_count(), 0);
    }

    // Tests initialization with a single request
    // Verified by skipping initialization for single requests
    #[test]
    fn test_initialize_single_file() {
        let mut pm = ProgressManager::new();
        run_batch(&mut pm, 1);
        assert_eq!(pm.file_count(), 1);
    }

    // Tests individual progress bars under the limit
    // Verified by creating one less progress bar
    #[test]
    fn test_multiple_files_under_limit() {
        let mut pm = ProgressManager::new();
        run_batch(&mut pm, MAX_INDIVIDUAL_PROGRESS_BARS - 1);
        assert_eq!(pm.file_count(), MAX_INDIVIDUAL_PROGRESS_BARS - 1);
    }

    // Tests the rolling window with a batch bar
    // Verified by changing batch mode threshold
    #[test]
    fn test_multiple_files_over_limit() {
        let mut pm = ProgressManager::new();
        run_batch(&mut pm, MAX_INDIVIDUAL_PROGRESS_BARS + 5);
        assert_eq!(pm.file_count(), MAX_INDIVIDUAL_PROGRESS_BARS + 5);
    }

    // Tests out-of-range stages and indices are tolerated
    // Verified by indexing the stage table directly
    #[test]
    fn test_out_of_range_updates() {
        let mut pm = ProgressManager::new();
        pm.initialize(2);
        pm.advance(7, 1);
        pm.start_file(3, Path::new("late.json"));
        pm.advance(3, STAGES.len() + 10);
        pm.complete_file(9);
        pm.finish();
    }
}

//! Tests for scene step progress tracking

#[cfg(test)]
mod tests {
    use tilestack::io::progress::ProgressManager;

    // Tests ProgressManager construction
    // Verified by setting wrong initial state
    #[test]
    fn test_progress_manager_new() {
        let mut pm = ProgressManager::new();
        assert_eq!(pm.completed(), 0);

        pm.initialize(0);
        pm.finish();
    }

    // Tests step completion is counted with and without an active bar
    // Verified by only counting when a bar exists
    #[test]
    fn test_complete_step_counts() {
        let mut pm = ProgressManager::default();
        pm.complete_step("before init");
        assert_eq!(pm.completed(), 1);

        pm.initialize(3);
        assert_eq!(pm.completed(), 0);

        pm.complete_step("add bg");
        pm.complete_step("add fg");
        assert_eq!(pm.completed(), 2);
        pm.finish();
    }
}

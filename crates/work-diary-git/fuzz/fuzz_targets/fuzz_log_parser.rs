#![no_main]

use libfuzzer_sys::fuzz_target;
use work_diary_git::parse_log_output;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        if let Ok(commits) = parse_log_output(raw) {
            for commit in commits {
                assert!(!commit.author.is_empty());
                assert!(!commit.date.is_empty());
            }
        }
    }
});

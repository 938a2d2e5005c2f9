//! Fan-out execution of one action over a set of repositories.
//!
//! Settle-all semantics: every repository's action runs to completion (or
//! failure) on the rayon pool, and one failure never cancels or blocks
//! siblings. The returned outcomes are deterministic: all failures first,
//! then all successes, each keeping the input's relative order.

use rayon::prelude::*;

use crate::error::Result;

/// One repository's settled outcome: captured output on success, the error
/// text on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// `"{owner}/{name}"`.
    pub id: String,
    pub result: std::result::Result<String, String>,
}

impl BatchOutcome {
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Run `action` over every item concurrently and collect settled outcomes,
/// failures ordered before successes.
pub fn run_batch<T, I, F>(items: &[T], id: I, action: F) -> Vec<BatchOutcome>
where
    T: Sync,
    I: Fn(&T) -> String + Sync,
    F: Fn(&T) -> Result<String> + Sync,
{
    let outcomes: Vec<BatchOutcome> = items
        .par_iter()
        .map(|item| BatchOutcome {
            id: id(item),
            result: action(item).map_err(|e| e.to_string()),
        })
        .collect();

    let (failures, successes): (Vec<_>, Vec<_>) =
        outcomes.into_iter().partition(BatchOutcome::is_failure);
    failures.into_iter().chain(successes).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_one_failure_never_cancels_siblings() {
        let items: Vec<usize> = (1..=5).collect();
        let outcomes = run_batch(
            &items,
            |n| format!("octo/repo{}", n),
            |n| {
                if *n == 3 {
                    Err(Error::Process {
                        command: "git fetch --all".to_string(),
                        stderr: "remote hung up".to_string(),
                    })
                } else {
                    Ok(format!("ok {}", n))
                }
            },
        );

        assert_eq!(outcomes.len(), 5);
        let ids: Vec<&str> = outcomes.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "octo/repo3",
                "octo/repo1",
                "octo/repo2",
                "octo/repo4",
                "octo/repo5",
            ]
        );
        assert!(outcomes[0].is_failure());
        assert!(outcomes[0]
            .result
            .as_ref()
            .unwrap_err()
            .contains("remote hung up"));
        assert!(outcomes[1..].iter().all(|o| !o.is_failure()));
    }

    #[test]
    fn test_failures_keep_relative_order() {
        let items: Vec<usize> = (1..=4).collect();
        let outcomes = run_batch(
            &items,
            |n| n.to_string(),
            |n| {
                if n % 2 == 0 {
                    Err(Error::NotFound { id: n.to_string() })
                } else {
                    Ok(String::new())
                }
            },
        );

        let ids: Vec<&str> = outcomes.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_empty_batch() {
        let outcomes = run_batch(&Vec::<usize>::new(), |n| n.to_string(), |_| Ok(String::new()));
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_success_captures_output() {
        let items = vec!["a"];
        let outcomes = run_batch(&items, |s| s.to_string(), |_| Ok("stdout text".to_string()));
        assert_eq!(outcomes[0].result.as_deref().unwrap(), "stdout text");
    }
}

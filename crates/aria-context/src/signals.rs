use aria_types::Workout;
use std::collections::HashMap;

const MIN_SESSIONS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct PlateauSignal {
    pub exercise: String,
    pub sessions: usize,
    pub top_weight: f64,
}

/// Find an exercise whose best working weight has not increased over its last
/// three or more logged sessions, counting the session that set the best.
///
/// `workouts` is newest first, as returned by the data store.
pub fn detect_plateau(workouts: &[Workout]) -> Option<PlateauSignal> {
    // exercise -> top weight per session, oldest first
    let mut history: HashMap<String, Vec<f64>> = HashMap::new();
    for workout in workouts.iter().rev() {
        let mut best: HashMap<String, f64> = HashMap::new();
        for exercise in &workout.exercises {
            let Some(weight) = exercise.weight else { continue };
            let key = exercise.name.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            let entry = best.entry(key).or_insert(weight);
            *entry = entry.max(weight);
        }
        for (name, weight) in best {
            history.entry(name).or_default().push(weight);
        }
    }

    let mut stalled: Vec<PlateauSignal> = history
        .into_iter()
        .filter_map(|(exercise, weights)| {
            let (top_weight, sessions) = trailing_stall(&weights);
            (sessions >= MIN_SESSIONS).then_some(PlateauSignal {
                exercise,
                sessions,
                top_weight,
            })
        })
        .collect();

    // Deterministic pick: most sessions, then name
    stalled.sort_by(|a, b| b.sessions.cmp(&a.sessions).then_with(|| a.exercise.cmp(&b.exercise)));
    stalled.into_iter().next()
}

/// Best weight so far and how many of the latest sessions have not beaten it.
///
/// `weights` is oldest first; the run includes the session that set the best.
fn trailing_stall(weights: &[f64]) -> (f64, usize) {
    let mut best = f64::MIN;
    let mut run = 0;
    for &weight in weights {
        if weight > best {
            best = weight;
            run = 1;
        } else {
            run += 1;
        }
    }
    (best, run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aria_types::WorkoutExercise;

    fn session(lifts: &[(&str, f64)]) -> Workout {
        Workout {
            exercises: lifts
                .iter()
                .map(|(name, weight)| WorkoutExercise {
                    name: name.to_string(),
                    weight: Some(*weight),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_flat_weight_is_plateau() {
        // newest first
        let workouts = vec![
            session(&[("Bench Press", 80.0)]),
            session(&[("Bench Press", 80.0)]),
            session(&[("Bench Press", 80.0)]),
        ];
        let signal = detect_plateau(&workouts).unwrap();
        assert_eq!(signal.exercise, "bench press");
        assert_eq!(signal.sessions, 3);
    }

    #[test]
    fn test_progressing_lift_is_not_plateau() {
        let workouts = vec![
            session(&[("Squat", 105.0)]),
            session(&[("Squat", 100.0)]),
            session(&[("Squat", 100.0)]),
        ];
        assert!(detect_plateau(&workouts).is_none());
    }

    #[test]
    fn test_stall_after_earlier_progress() {
        // newest first: climbed 60 -> 80, then flat for four sessions
        let workouts: Vec<Workout> = [80.0, 80.0, 80.0, 80.0, 70.0, 60.0]
            .iter()
            .map(|w| session(&[("Bench", *w)]))
            .collect();
        let signal = detect_plateau(&workouts).unwrap();
        assert_eq!(signal.exercise, "bench");
        assert_eq!(signal.sessions, 4);
        assert_eq!(signal.top_weight, 80.0);
    }

    #[test]
    fn test_recent_personal_best_resets_stall() {
        let workouts: Vec<Workout> = [85.0, 80.0, 80.0, 80.0]
            .iter()
            .map(|w| session(&[("Bench", *w)]))
            .collect();
        assert!(detect_plateau(&workouts).is_none());
    }

    #[test]
    fn test_needs_three_sessions() {
        let workouts = vec![session(&[("Row", 60.0)]), session(&[("Row", 60.0)])];
        assert!(detect_plateau(&workouts).is_none());
    }
}

use rand::Rng;
use serde::Serialize;

/// Result of one simulated test run, in the units the screen displays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedTestResult {
    pub download_mbps: f64,
    pub upload_mbps: f64,
    pub ping_ms: f64,
}

fn sample(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
    (rng.gen_range(min..max) * 100.0).round() / 100.0
}

/// The speed test the app ships is a simulation; it samples plausible
/// residential-connection numbers rather than measuring anything.
pub fn run_speed_test() -> SpeedTestResult {
    let mut rng = rand::thread_rng();
    SpeedTestResult {
        download_mbps: sample(&mut rng, 30.0, 150.0),
        upload_mbps: sample(&mut rng, 10.0, 80.0),
        ping_ms: sample(&mut rng, 5.0, 40.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_stay_in_their_ranges() {
        for _ in 0..200 {
            let r = run_speed_test();
            assert!((30.0..150.0).contains(&r.download_mbps));
            assert!((10.0..80.0).contains(&r.upload_mbps));
            assert!((5.0..40.0).contains(&r.ping_ms));
        }
    }

    #[test]
    fn results_round_to_two_decimals() {
        for _ in 0..50 {
            let r = run_speed_test();
            for v in [r.download_mbps, r.upload_mbps, r.ping_ms] {
                assert_eq!((v * 100.0).round() / 100.0, v);
            }
        }
    }
}

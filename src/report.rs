//! Console presentation of a ranked batch

use scout_core::ScoredVideo;
use std::fmt::Write;

use crate::config::DisplayConfig;
use crate::pipeline::ScoutRun;

/// Curve applied to the relative score before scaling to five stars
const STAR_CURVE_EXPONENT: f64 = 0.7;
const MAX_STARS: f64 = 5.0;

/// Rating out of five relative to the best score on the podium.
///
/// Returns 0 when either score is unusable (no finite positive best score,
/// or a non-finite row score).
pub fn star_rating(final_score: f64, top_score: f64) -> f64 {
    if !top_score.is_finite() || top_score <= 0.0 || !final_score.is_finite() {
        return 0.0;
    }
    (final_score / top_score).max(0.0).powf(STAR_CURVE_EXPONENT) * MAX_STARS
}

/// Whole-star rendering of a rating
pub fn stars(rating: f64) -> String {
    "⭐".repeat(rating.round().max(0.0) as usize)
}

/// Best score among the podium entries
pub fn podium_top_score(podium: &[ScoredVideo]) -> f64 {
    podium
        .iter()
        .map(|v| v.final_score)
        .filter(|s| s.is_finite())
        .fold(f64::NAN, f64::max)
}

/// Full console report: podium, runners-up, or a no-results notice
pub fn render_report(run: &ScoutRun, display: &DisplayConfig) -> String {
    if run.is_empty() {
        return format!("No videos found for '{}'. Try a broader topic.\n", run.topic);
    }

    let podium = run.batch.top(display.podium_size);
    let runners_up = run.batch.window(display.podium_size, display.runners_up);

    let mut out = render_podium(&run.topic, podium);
    if !runners_up.is_empty() {
        out.push('\n');
        out.push_str(&render_runners_up(runners_up));
    }
    out
}

pub fn render_podium(topic: &str, podium: &[ScoredVideo]) -> String {
    let top_score = podium_top_score(podium);
    let mut out = String::new();

    let _ = writeln!(out, "🏆 Top {} recommendations for '{}'\n", podium.len(), topic);
    for video in podium {
        let rating = star_rating(video.final_score, top_score);
        let _ = writeln!(out, "#{} {}", video.rank, video.video.title);
        let _ = writeln!(out, "   {}", video.video.channel);
        let _ = writeln!(out, "   {} ({:.2} / 5)", stars(rating), rating);
        let _ = writeln!(out, "   ⏱️  {}", video.video.duration_label);
        let _ = writeln!(out, "   🔗 {}", video.video.url);
        let _ = writeln!(out, "   🖼️  {}\n", video.video.thumbnail_url());
    }
    out
}

pub fn render_runners_up(runners_up: &[ScoredVideo]) -> String {
    let mut out = String::from("🔽 Next suggestions\n\n");
    for video in runners_up {
        let _ = writeln!(out, "#{} — {}", video.rank, video.video.title);
        let _ = writeln!(out, "   Channel: {}", video.video.channel);
        let _ = writeln!(out, "   ⏱️  Duration: {}", video.video.duration_label);
        let _ = writeln!(out, "   🔗 {}\n", video.video.url);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_rating() {
        assert_eq!(star_rating(8.0, 8.0), 5.0);
        assert!((star_rating(4.0, 8.0) - 0.5f64.powf(0.7) * 5.0).abs() < 1e-12);
        assert_eq!(star_rating(0.0, 8.0), 0.0);
    }

    #[test]
    fn test_star_rating_degenerate_inputs() {
        assert_eq!(star_rating(1.0, 0.0), 0.0);
        assert_eq!(star_rating(1.0, f64::NAN), 0.0);
        assert_eq!(star_rating(f64::NAN, 5.0), 0.0);
    }

    #[test]
    fn test_stars_rounding() {
        assert_eq!(stars(5.0), "⭐⭐⭐⭐⭐");
        assert_eq!(stars(3.08), "⭐⭐⭐");
        assert_eq!(stars(2.5), "⭐⭐⭐");
        assert_eq!(stars(0.2), "");
    }
}

//! tunelog-wrapped - Listening History in Review CLI
//!
//! Generate Spotify Wrapped-style summaries of a music listening history,
//! optionally side by side with a second history.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Weekday};
use clap::Parser;
use tunelog_core::analytics::{
    compare_histories, generate_wrapped, ArtistShift, HistoryComparison, ObsessionTier,
    WrappedConfig, WrappedReport,
};
use tunelog_core::{Config, EventTable, TimeBucket, WeekPart};

#[derive(Parser, Debug)]
#[command(name = "tunelog-wrapped")]
#[command(about = "Listening Wrapped - Your Music History in Review")]
#[command(version)]
struct Args {
    /// Listening history (JSON array or JSON Lines)
    history: PathBuf,

    /// Name shown for the history (default: file name)
    #[arg(long)]
    label: Option<String>,

    /// Second listening history to compare against
    #[arg(long)]
    compare: Option<PathBuf>,

    /// Name shown for the second history (default: file name)
    #[arg(long)]
    compare_label: Option<String>,

    /// Disable fun mode (no emoji)
    #[arg(long)]
    serious: bool,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,

    /// Number of top artists to show
    #[arg(long)]
    top: Option<usize>,

    /// Minutes a day needs for the streak
    #[arg(long)]
    streak_min_minutes: Option<f64>,
}

/// One loaded history with its report.
struct Wrapped {
    label: String,
    table: EventTable,
    report: WrappedReport,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = tunelog_core::logging::init(&config.logging).ok();

    let mut analytics = config.analytics.clone();
    if let Some(top) = args.top {
        analytics.top_artists = top;
    }
    if let Some(minutes) = args.streak_min_minutes {
        analytics.streak_min_minutes = minutes;
    }
    analytics
        .validate()
        .context("invalid analytics settings")?;
    let wrapped_config = WrappedConfig::from(&analytics);

    // Validate the export format before doing any work
    let export = args.export.as_deref();
    if let Some(other) = export.filter(|f| *f != "md" && *f != "json") {
        anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other);
    }

    let mut histories = vec![load_wrapped(
        &args.history,
        args.label.as_deref(),
        &wrapped_config,
    )?];
    if let Some(path) = &args.compare {
        histories.push(load_wrapped(
            path,
            args.compare_label.as_deref(),
            &wrapped_config,
        )?);
    }

    let comparison = match histories.as_slice() {
        [left, right] => Some(compare_histories(
            (left.label.as_str(), &left.table),
            (right.label.as_str(), &right.table),
            &analytics.obsession_ranks,
        )),
        _ => None,
    };

    let fun_mode = !args.serious;
    match export {
        Some("json") => print_json(&histories, comparison.as_ref())?,
        Some(_) => {
            for wrapped in &histories {
                print_markdown(wrapped, fun_mode);
            }
            if let Some(cmp) = &comparison {
                print_comparison_markdown(cmp);
            }
        }
        None => {
            for wrapped in &histories {
                print_terminal(wrapped, fun_mode);
            }
            if let Some(cmp) = &comparison {
                print_comparison_terminal(cmp, fun_mode);
            }
        }
    }

    Ok(())
}

fn load_wrapped(path: &Path, label: Option<&str>, config: &WrappedConfig) -> Result<Wrapped> {
    let table = EventTable::load(path)
        .with_context(|| format!("failed to load listening history {}", path.display()))?;
    let label = label.map(str::to_string).unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "history".to_string())
    });
    let report = generate_wrapped(&table, config);
    Ok(Wrapped {
        label,
        table,
        report,
    })
}

fn print_terminal(wrapped: &Wrapped, fun_mode: bool) {
    let stats = &wrapped.report;
    let title = if fun_mode {
        format!("🎧 {} LISTENING WRAPPED 🎧", wrapped.label.to_uppercase())
    } else {
        format!("Listening Summary: {}", wrapped.label)
    };

    // Header
    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!();

    if stats.is_empty() {
        println!("  No plays found in this history.");
        println!();
        return;
    }

    // The Numbers
    section("📊 THE NUMBERS", "SUMMARY", fun_mode);
    println!(
        "   Minutes:  {:<12} Listening time: {}",
        format!("{:.0}", stats.overview.total_minutes),
        duration_display(stats.overview.total_minutes)
    );
    println!(
        "   Days:     {:<12} Artists: {}",
        stats.overview.active_days, stats.overview.distinct_artists
    );
    println!(
        "   Plays:    {:<12} Tracks: {}",
        stats.overview.plays, stats.overview.distinct_tracks
    );
    println!();

    // Top Artists
    if !stats.top_artists.is_empty() {
        section("🏆 TOP ARTISTS", "TOP ARTISTS", fun_mode);
        for (i, artist) in stats.top_artists.iter().enumerate() {
            println!(
                "   {} {:<28} {:>8.0} min",
                rank_marker(i, fun_mode),
                artist.artist,
                artist.minutes
            );
        }
        println!();
    }

    // Top Tracks
    if !stats.top_tracks.is_empty() {
        section("🎵 TOP TRACKS", "TOP TRACKS", fun_mode);
        for (i, track) in stats.top_tracks.iter().enumerate() {
            println!(
                "   {:>2}. {} - {} ({:.0} min)",
                i + 1,
                track.track,
                track.artist,
                track.minutes
            );
        }
        println!();
    }

    // Obsession
    section("💘 OBSESSION INDEX", "OBSESSION INDEX", fun_mode);
    let levels: Vec<String> = stats
        .obsession
        .iter()
        .map(|l| format!("Top {}: {:.1}%", l.rank, l.percentage))
        .collect();
    println!("   {}", levels.join("  │  "));
    let segments: Vec<String> = stats
        .obsession_breakdown
        .iter()
        .map(|s| format!("{} {:.1}%", tier_label(s.tier), s.percentage))
        .collect();
    if !segments.is_empty() {
        println!("   Split:  {}", segments.join(", "));
    }
    println!();

    // Rhythm
    section("⏰ LISTENING RHYTHM", "LISTENING RHYTHM", fun_mode);
    if let Some(peak) = stats.hours.last() {
        println!("   Peak hour:    {}", hour_display(peak.hour));
    }
    if let Some(day) = stats
        .weekdays
        .iter()
        .max_by(|a, b| a.minutes.total_cmp(&b.minutes))
    {
        println!("   Busiest day:  {}", weekday_name(day.weekday));
    }
    let buckets: Vec<String> = stats
        .time_buckets
        .iter()
        .map(|b| format!("{} {:.0}", bucket_label(b.bucket), b.minutes))
        .collect();
    println!("   Time of day:  {}", buckets.join(" · "));
    match stats.weekday_weekend_ratio {
        Some(ratio) => println!("   Weekday vs weekend: {:.2}x", ratio),
        None => println!("   Weekday vs weekend: N/A"),
    }
    if let Some(day) = &stats.busiest_day {
        println!(
            "   Biggest day:  {} - {:.0} min, mostly {}",
            date_display(day.date),
            day.minutes,
            day.top_artist
        );
    }
    println!();

    // Months
    if !stats.months.is_empty() {
        section("📅 MINUTES BY MONTH", "MINUTES BY MONTH", fun_mode);
        let max = stats
            .months
            .iter()
            .map(|m| m.minutes)
            .fold(0.0f64, f64::max);
        for month in &stats.months {
            let width = if max > 0.0 {
                (month.minutes / max * 30.0).round() as usize
            } else {
                0
            };
            println!(
                "   {}-{:02}  {:<30} {:>7.0}",
                month.year,
                month.month,
                "█".repeat(width),
                month.minutes
            );
        }
        println!();
    }

    // Consistency
    section("🔥 CONSISTENCY", "CONSISTENCY", fun_mode);
    if stats.streak.length > 0 {
        let dates = match (stats.streak.start_date, stats.streak.end_date) {
            (Some(start), Some(end)) => {
                format!(" ({} - {})", date_display(start), date_display(end))
            }
            _ => String::new(),
        };
        println!(
            "   Longest streak (≥{:.0} min/day): {} day{}{}",
            stats.streak_min_minutes,
            stats.streak.length,
            if stats.streak.length == 1 { "" } else { "s" },
            dates
        );
    } else {
        println!(
            "   No day reached {:.0} minutes",
            stats.streak_min_minutes
        );
    }
    if let Some(var) = &stats.variability {
        println!(
            "   Per day:  mean {:.1}  │  median {:.1}  │  std {:.1}",
            var.mean, var.median, var.std_dev
        );
        println!(
            "   Big days: {}  │  Quiet days: {}",
            var.high_days, var.low_days
        );
    }
    println!();

    // Emerging / fading
    let shifts = &stats.artist_shifts;
    if !shifts.emerging.is_empty() {
        section("📈 EMERGING ARTISTS", "EMERGING ARTISTS", fun_mode);
        for shift in shifts.emerging.iter().filter(|s| s.delta > 0.0) {
            println!("   {:<28} {:>+8.0} min", shift.artist, shift.delta);
        }
        println!();
        section("📉 FADING ARTISTS", "FADING ARTISTS", fun_mode);
        for shift in shifts.fading.iter().filter(|s| s.delta < 0.0) {
            println!("   {:<28} {:>+8.0} min", shift.artist, shift.delta);
        }
        println!();
    }
}

fn print_comparison_terminal(cmp: &HistoryComparison, fun_mode: bool) {
    section("⚔️  HEAD TO HEAD", "COMPARISON", fun_mode);
    println!(
        "   {:<20} {:>10.0} min",
        cmp.left.label, cmp.left.total_minutes
    );
    println!(
        "   {:<20} {:>10.0} min",
        cmp.right.label, cmp.right.total_minutes
    );
    println!("   {:<20} {:>10.0} min", "Combined", cmp.combined_minutes);
    println!();
    for (left, right) in cmp.left.obsession.iter().zip(&cmp.right.obsession) {
        println!(
            "   Top {:<3} {:>6.1}% vs {:>6.1}%",
            left.rank, left.percentage, right.percentage
        );
    }
    println!();
    println!(
        "   {:<8} {:>12} {:>12}",
        "Month", cmp.left.label, cmp.right.label
    );
    for month in &cmp.months {
        println!(
            "   {}-{:02}  {:>12} {:>12}",
            month.year,
            month.month,
            optional_minutes(month.left_minutes),
            optional_minutes(month.right_minutes)
        );
    }
    println!();
}

fn print_markdown(wrapped: &Wrapped, fun_mode: bool) {
    let stats = &wrapped.report;
    let title = if fun_mode {
        format!("🎧 {} Listening Wrapped 🎧", wrapped.label)
    } else {
        format!("Listening Summary: {}", wrapped.label)
    };

    println!("# {}", title);
    println!();

    if stats.is_empty() {
        println!("*No plays found in this history.*");
        println!();
        return;
    }

    // Summary table
    println!("## Summary");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Minutes | {:.0} |", stats.overview.total_minutes);
    println!(
        "| Listening time | {} |",
        duration_display(stats.overview.total_minutes)
    );
    println!("| Days with music | {} |", stats.overview.active_days);
    println!("| Artists | {} |", stats.overview.distinct_artists);
    println!("| Tracks | {} |", stats.overview.distinct_tracks);
    println!("| Plays | {} |", stats.overview.plays);
    println!();

    if !stats.top_artists.is_empty() {
        println!("## Top Artists");
        println!();
        for (i, artist) in stats.top_artists.iter().enumerate() {
            println!(
                "{}. **{}** - {:.0} min",
                i + 1,
                artist.artist,
                artist.minutes
            );
        }
        println!();
    }

    if !stats.top_tracks.is_empty() {
        println!("## Top Tracks");
        println!();
        for (i, track) in stats.top_tracks.iter().enumerate() {
            println!(
                "{}. **{}** - {} - {:.0} min",
                i + 1,
                track.track,
                track.artist,
                track.minutes
            );
        }
        println!();
    }

    println!("## Obsession Index");
    println!();
    println!("| Cutoff | Share |");
    println!("|--------|-------|");
    for level in &stats.obsession {
        println!("| Top {} | {:.1}% |", level.rank, level.percentage);
    }
    println!();

    println!("## Listening Rhythm");
    println!();
    if let Some(peak) = stats.hours.last() {
        println!("- **Peak hour:** {}", hour_display(peak.hour));
    }
    for bucket in &stats.time_buckets {
        let (first, last) = bucket.bucket.hours();
        println!(
            "- **{}** ({:02}:00-{:02}:59): {:.0} min",
            bucket_label(bucket.bucket),
            first,
            last,
            bucket.minutes
        );
    }
    for group in &stats.week_parts.groups {
        let name = match group.part {
            WeekPart::Weekday => "Weekdays",
            WeekPart::Weekend => "Weekends",
        };
        println!(
            "- **{}:** {:.1} min/day over {} days",
            name, group.mean_minutes_per_day, group.active_days
        );
    }
    match stats.weekday_weekend_ratio {
        Some(ratio) => println!("- **Weekday vs weekend:** {:.2}x", ratio),
        None => println!("- **Weekday vs weekend:** N/A"),
    }
    println!();

    println!("## Consistency");
    println!();
    println!(
        "- **Longest streak (≥{:.0} min/day):** {} days",
        stats.streak_min_minutes, stats.streak.length
    );
    if let Some(var) = &stats.variability {
        println!("- **Mean per day:** {:.1} min", var.mean);
        println!(
            "- **Quartiles:** {:.1} / {:.1} / {:.1}",
            var.p25, var.median, var.p75
        );
        println!(
            "- **Big days:** {}, **quiet days:** {}",
            var.high_days, var.low_days
        );
    }
    if let Some(day) = &stats.busiest_day {
        println!(
            "- **Biggest day:** {} ({:.0} min, mostly {})",
            date_display(day.date),
            day.minutes,
            day.top_artist
        );
    }
    println!();

    if !stats.artist_shifts.emerging.is_empty() {
        print_shift_table("Emerging Artists", &stats.artist_shifts.emerging);
        print_shift_table("Fading Artists", &stats.artist_shifts.fading);
    }

    println!("---");
    println!("*Generated by tunelog-wrapped*");
    println!();
}

fn print_shift_table(title: &str, shifts: &[ArtistShift]) {
    println!("## {}", title);
    println!();
    println!("| Artist | First half | Second half | Change |");
    println!("|--------|-----------:|------------:|-------:|");
    for shift in shifts {
        println!(
            "| {} | {:.0} | {:.0} | {:+.0} |",
            shift.artist, shift.first_half_minutes, shift.second_half_minutes, shift.delta
        );
    }
    println!();
}

fn print_comparison_markdown(cmp: &HistoryComparison) {
    println!("# {} vs {}", cmp.left.label, cmp.right.label);
    println!();
    println!("| | {} | {} |", cmp.left.label, cmp.right.label);
    println!("|--|--:|--:|");
    println!(
        "| Minutes | {:.0} | {:.0} |",
        cmp.left.total_minutes, cmp.right.total_minutes
    );
    for (left, right) in cmp.left.obsession.iter().zip(&cmp.right.obsession) {
        println!(
            "| Top {} | {:.1}% | {:.1}% |",
            left.rank, left.percentage, right.percentage
        );
    }
    println!();
    println!("**Combined:** {:.0} min", cmp.combined_minutes);
    println!();
}

fn print_json(histories: &[Wrapped], comparison: Option<&HistoryComparison>) -> Result<()> {
    let json = serde_json::json!({
        "histories": histories.iter().map(|w| serde_json::json!({
            "label": w.label,
            "report": w.report,
        })).collect::<Vec<_>>(),
        "comparison": comparison,
    });

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn section(fun: &str, plain: &str, fun_mode: bool) {
    if fun_mode {
        println!("{}", fun);
    } else {
        println!("{}", plain);
    }
}

fn rank_marker(i: usize, fun_mode: bool) -> String {
    match i {
        0 if fun_mode => "🥇".to_string(),
        1 if fun_mode => "🥈".to_string(),
        2 if fun_mode => "🥉".to_string(),
        _ => format!("{:>2}.", i + 1),
    }
}

/// Format minutes as hours and minutes (e.g., "312h 45m").
fn duration_display(minutes: f64) -> String {
    let total = minutes.round() as i64;
    let hours = total / 60;
    let mins = total % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

/// Hour range display (e.g., "10am–11am").
fn hour_display(hour: u32) -> String {
    let h = hour % 12;
    let h = if h == 0 { 12 } else { h };
    let period = if hour < 12 { "am" } else { "pm" };
    let next_h = (hour + 1) % 12;
    let next_h = if next_h == 0 { 12 } else { next_h };
    let next_period = if (hour + 1) % 24 < 12 { "am" } else { "pm" };
    format!("{}{}–{}{}", h, period, next_h, next_period)
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn bucket_label(bucket: TimeBucket) -> &'static str {
    match bucket {
        TimeBucket::Madrugada => "Late night",
        TimeBucket::Manana => "Morning",
        TimeBucket::Tarde => "Afternoon",
        TimeBucket::Noche => "Evening",
    }
}

fn tier_label(tier: ObsessionTier) -> &'static str {
    match tier {
        ObsessionTier::Top1 => "Top 1",
        ObsessionTier::RestOfTop5 => "Top 2-5",
        ObsessionTier::RestOfTop10 => "Top 6-10",
        ObsessionTier::Other => "Everyone else",
    }
}

fn date_display(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

fn optional_minutes(minutes: Option<f64>) -> String {
    minutes
        .map(|m| format!("{:.0}", m))
        .unwrap_or_else(|| "—".to_string())
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::models::PersonalStats;
use crate::style::SlideStyle;

const STATS_SUFFIX: &str = "_stats.json";
const MANIFEST_SUFFIX: &str = "_images.json";

/// One line of centered slide text: vertical position as a fraction of the
/// slide height, font size, accent flag, content.
struct Line {
    y: f64,
    size: u32,
    accent: bool,
    text: String,
}

/// Output directory for a user's slides, created as a sibling of the stats
/// file.
pub fn slides_dir(stats_path: &Path, user_id: &str) -> PathBuf {
    let parent = stats_path.parent().unwrap_or_else(|| Path::new("."));
    parent.join(format!("user_{user_id}_slides"))
}

/// Manifest path derived from the stats path by swapping the `_stats.json`
/// suffix for `_images.json`. A stats file that does not follow the naming
/// convention is rejected up front, before any slide is rendered.
pub fn manifest_path(stats_path: &Path) -> anyhow::Result<PathBuf> {
    let name = stats_path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("stats path {} has no usable file name", stats_path.display()))?;

    let Some(base) = name.strip_suffix(STATS_SUFFIX) else {
        bail!("stats file name {name:?} does not end in {STATS_SUFFIX:?}");
    };

    Ok(stats_path.with_file_name(format!("{base}{MANIFEST_SUFFIX}")))
}

/// Renders the five slides in fixed order and returns their paths. Slides
/// already written stay on disk if a later one fails.
pub fn generate_slides(
    stats: &PersonalStats,
    dir: &Path,
    style: &SlideStyle,
) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create slide directory {}", dir.display()))?;

    Ok(vec![
        title_slide(stats, dir, style)?,
        total_slide(stats, dir, style)?,
        streak_slide(stats, dir, style)?,
        extreme_day_slide(stats, dir, style)?,
        ranking_slide(stats, dir, style)?,
    ])
}

/// Writes the ordered list of slide paths as pretty-printed JSON.
pub fn write_manifest(paths: &[PathBuf], out: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(paths)?;
    fs::write(out, json).with_context(|| format!("failed to write manifest {}", out.display()))?;
    Ok(())
}

fn title_slide(stats: &PersonalStats, dir: &Path, style: &SlideStyle) -> anyhow::Result<PathBuf> {
    let path = dir.join("slide_01_title.png");
    draw_slide(
        &path,
        style,
        &[
            Line {
                y: 0.40,
                size: 48,
                accent: false,
                text: format!("Your Poop Wrapped {}", stats.year),
            },
            Line {
                y: 0.60,
                size: 72,
                accent: true,
                text: "💩".to_string(),
            },
        ],
    )?;
    Ok(path)
}

fn total_slide(stats: &PersonalStats, dir: &Path, style: &SlideStyle) -> anyhow::Result<PathBuf> {
    let path = dir.join("slide_02_total.png");
    let mut lines = vec![
        Line {
            y: 0.30,
            size: 72,
            accent: true,
            text: stats.total_poops.to_string(),
        },
        Line {
            y: 0.50,
            size: 32,
            accent: false,
            text: "Total dumps".to_string(),
        },
    ];

    if let Some(rank) = &stats.group_rank {
        lines.push(Line {
            y: 0.70,
            size: 24,
            accent: false,
            text: format!("That's more than {:.1}% of the group", rank.percentage),
        });
    }

    draw_slide(&path, style, &lines)?;
    Ok(path)
}

fn streak_slide(stats: &PersonalStats, dir: &Path, style: &SlideStyle) -> anyhow::Result<PathBuf> {
    let path = dir.join("slide_03_streak.png");
    draw_slide(
        &path,
        style,
        &[
            Line {
                y: 0.30,
                size: 72,
                accent: true,
                text: stats.max_streak.to_string(),
            },
            Line {
                y: 0.50,
                size: 32,
                accent: false,
                text: "Longest streak".to_string(),
            },
            Line {
                y: 0.70,
                size: 24,
                accent: false,
                text: "Your bowels respect routine".to_string(),
            },
        ],
    )?;
    Ok(path)
}

fn extreme_day_slide(
    stats: &PersonalStats,
    dir: &Path,
    style: &SlideStyle,
) -> anyhow::Result<PathBuf> {
    let path = dir.join("slide_04_extreme.png");
    draw_slide(
        &path,
        style,
        &[
            Line {
                y: 0.30,
                size: 72,
                accent: true,
                text: stats.most_poops_count.to_string(),
            },
            Line {
                y: 0.50,
                size: 32,
                accent: false,
                text: format!("poops on {}", stats.day_with_most_poops),
            },
            Line {
                y: 0.70,
                size: 24,
                accent: false,
                text: "Your wildest day".to_string(),
            },
        ],
    )?;
    Ok(path)
}

fn ranking_slide(stats: &PersonalStats, dir: &Path, style: &SlideStyle) -> anyhow::Result<PathBuf> {
    let path = dir.join("slide_05_ranking.png");
    let lines = match &stats.group_rank {
        Some(rank) => vec![
            Line {
                y: 0.30,
                size: 72,
                accent: true,
                text: format!("#{}", rank.rank),
            },
            Line {
                y: 0.50,
                size: 32,
                accent: false,
                text: format!("out of {} poopers", rank.total_users),
            },
        ],
        None => vec![Line {
            y: 0.40,
            size: 32,
            accent: false,
            text: "Ranking unavailable".to_string(),
        }],
    };

    draw_slide(&path, style, &lines)?;
    Ok(path)
}

fn draw_slide(path: &Path, style: &SlideStyle, lines: &[Line]) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&style.background)?;

    let center_x = style.width as i32 / 2;
    for line in lines {
        let color = if line.accent { style.accent } else { style.text_color };
        let text_style = ("sans-serif", line.size)
            .into_font()
            .color(&color)
            .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(
            line.text.clone(),
            (center_x, (style.height as f64 * line.y) as i32),
            text_style,
        ))?;
    }

    root.present()
        .with_context(|| format!("failed to write slide {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroupRank;
    use chrono::NaiveDate;

    const SLIDE_NAMES: [&str; 5] = [
        "slide_01_title.png",
        "slide_02_total.png",
        "slide_03_streak.png",
        "slide_04_extreme.png",
        "slide_05_ranking.png",
    ];

    fn base_stats() -> PersonalStats {
        PersonalStats {
            user_id: "u1".to_string(),
            year: 2025,
            total_poops: 42,
            max_streak: 7,
            most_poops_count: 5,
            day_with_most_poops: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            group_rank: None,
        }
    }

    fn ranked_stats() -> PersonalStats {
        PersonalStats {
            group_rank: Some(GroupRank {
                rank: 3,
                total_users: 10,
                percentage: 70.0,
            }),
            ..base_stats()
        }
    }

    #[test]
    fn manifest_path_swaps_suffix() {
        let derived = manifest_path(Path::new("/tmp/wrapped/user_7_stats.json")).unwrap();
        assert_eq!(derived, PathBuf::from("/tmp/wrapped/user_7_images.json"));
    }

    #[test]
    fn manifest_path_rejects_unexpected_names() {
        let err = manifest_path(Path::new("/tmp/wrapped/user_7.json")).unwrap_err();
        assert!(err.to_string().contains("_stats.json"), "got: {err}");
    }

    #[test]
    fn slides_dir_is_sibling_of_stats_file() {
        let dir = slides_dir(Path::new("/tmp/wrapped/user_7_stats.json"), "7");
        assert_eq!(dir, PathBuf::from("/tmp/wrapped/user_7_slides"));
    }

    #[test]
    fn renders_five_slides_without_group_rank() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("user_u1_slides");

        let paths = generate_slides(&base_stats(), &out_dir, &SlideStyle::default()).unwrap();

        assert_eq!(paths.len(), 5);
        for (path, name) in paths.iter().zip(SLIDE_NAMES) {
            assert_eq!(path, &out_dir.join(name));
            assert!(std::fs::metadata(path).unwrap().len() > 0);
        }
    }

    #[test]
    fn renders_five_slides_with_group_rank() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("user_u1_slides");

        let paths = generate_slides(&ranked_stats(), &out_dir, &SlideStyle::default()).unwrap();

        assert_eq!(paths.len(), 5);
        assert!(paths.iter().all(|p| p.exists()));
    }

    #[test]
    fn slide_directory_creation_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("user_u1_slides");

        generate_slides(&base_stats(), &out_dir, &SlideStyle::default()).unwrap();
        generate_slides(&ranked_stats(), &out_dir, &SlideStyle::default()).unwrap();
    }

    #[test]
    fn manifest_lists_paths_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("user_u1_slides");
        let manifest = tmp.path().join("user_u1_images.json");

        let paths = generate_slides(&base_stats(), &out_dir, &SlideStyle::default()).unwrap();
        write_manifest(&paths, &manifest).unwrap();

        let raw = std::fs::read_to_string(&manifest).unwrap();
        let listed: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(listed.len(), 5);
        for (entry, name) in listed.iter().zip(SLIDE_NAMES) {
            assert!(entry.ends_with(name), "{entry} should end with {name}");
        }
    }
}

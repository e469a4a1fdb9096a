//! TUI layout and rendering with ratatui.
//!
//! Rendering is a total function of the application state: loading shows the
//! busy indicator, a failed load shows the error screen, and the ready state
//! shows either the module list or the detail view. The detail body is built
//! by [`detail_lines`], a pure function that tests can assert on directly.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::app::{App, View};
use super::theme::Theme;
use crate::model::{Module, ModuleStatus};

/// Detail view help line.
const DETAIL_HELP: &str =
    "Press ESC or Backspace to return to list • Press d to toggle algorithm details";

/// Placeholder shown when the expanded algorithm view has no data.
const NO_DETAILED_ALGORITHMS: &str = "  (No detailed algorithm data available yet)";

/// Render the TUI based on the current application state.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = inset(frame.area(), 2, 1);

    if app.is_loading() {
        render_loading(frame, app, theme, area);
        return;
    }

    if let Some(message) = app.error() {
        render_error(frame, message, theme, area);
        return;
    }

    match app.view() {
        View::Detail => render_detail(frame, app, theme, area),
        View::List => {
            if let Some(list) = app.list() {
                list.render(frame, area, theme);
            }
        }
    }
}

/// Shrink an area by a horizontal and vertical margin.
fn inset(area: Rect, horizontal: u16, vertical: u16) -> Rect {
    Rect {
        x: area.x + horizontal.min(area.width / 2),
        y: area.y + vertical.min(area.height / 2),
        width: area.width.saturating_sub(horizontal * 2),
        height: area.height.saturating_sub(vertical * 2),
    }
}

fn render_loading(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let line = Line::from(vec![
        Span::styled(app.spinner(), Style::default().fg(theme.primary)),
        Span::styled(" Loading CMVP modules...", Style::default().fg(theme.normal)),
    ]);
    let text = Text::from(vec![Line::default(), Line::default(), line]);
    frame.render_widget(Paragraph::new(text), area);
}

fn render_error(frame: &mut Frame, message: &str, theme: &Theme, area: Rect) {
    let text = Text::from(vec![
        Line::default(),
        Line::default(),
        Line::from(Span::styled(
            format!("Error: {message}"),
            Style::default().fg(theme.danger),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Press q to quit.",
            Style::default().fg(theme.subtle),
        )),
    ]);
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), area);
}

fn render_detail(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let Some(module) = app.selected() else {
        return;
    };
    let lines = detail_lines(module, app.show_algo_details(), theme);
    frame.render_widget(
        Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }),
        area,
    );
}

/// Status badge, e.g. " ACTIVE " on the status color.
pub fn status_badge(status: ModuleStatus, theme: &Theme) -> Span<'static> {
    let label = match status {
        ModuleStatus::Active => " ACTIVE ",
        ModuleStatus::Historical => " HISTORICAL ",
        ModuleStatus::InProcess => " IN PROCESS ",
    };
    let fg = if status == ModuleStatus::InProcess {
        theme.inverted_fg
    } else {
        theme.normal
    };
    Span::styled(label, Style::default().fg(fg).bg(theme.status_color(status)))
}

/// Color-coded security level badge; empty for unrated modules.
pub fn level_badge(level: u8, theme: &Theme) -> Span<'static> {
    match theme.level_color(level) {
        Some(bg) => Span::styled(
            format!(" Level {level} "),
            Style::default().fg(theme.inverted_fg).bg(bg),
        ),
        None => Span::raw(""),
    }
}

/// Build the detail view body for one module.
///
/// Label/value rows are skipped entirely when the value is empty; the
/// algorithm block switches between the short tag list and the detailed list
/// based on `show_algo_details`.
pub fn detail_lines(module: &Module, show_algo_details: bool, theme: &Theme) -> Vec<Line<'static>> {
    let label_style = Style::default().fg(theme.subtle);
    let value_style = Style::default().fg(theme.normal);
    let help_style = Style::default().fg(theme.subtle);

    let mut lines: Vec<Line<'static>> = Vec::new();

    // Title with status badge and level badge
    let mut title = vec![
        Span::styled(
            module.module_name.clone(),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        status_badge(module.status, theme),
    ];
    if module.overall_level > 0 {
        title.push(Span::raw("  "));
        title.push(level_badge(module.overall_level, theme));
    }
    lines.push(Line::from(title));
    lines.push(Line::default());

    // Caveat warning, displayed prominently when present
    if !module.caveat.is_empty() {
        lines.push(Line::from(Span::styled("CAVEAT:", label_style)));
        lines.push(Line::from(Span::styled(
            format!(" {} ", module.caveat),
            Style::default()
                .fg(theme.normal)
                .bg(theme.caveat_bg)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
    }

    // Details grid; empty values are skipped entirely
    let mut details: Vec<(&str, String, bool)> = vec![
        ("Certificate #:", module.certificate_number.clone(), false),
        ("Vendor:", module.vendor_name.clone(), false),
        ("Module Type:", module.module_type.clone(), false),
        ("Standard:", module.standard.clone(), false),
        ("Embodiment:", module.embodiment.clone(), false),
        ("Lab:", module.lab.clone(), false),
    ];
    if let Some(date) = module.validation_date_display() {
        details.push(("Validation Date:", date, false));
    }
    if !module.sunset_date.is_empty() {
        details.push(("Sunset Date:", module.sunset_date.clone(), false));
    }
    if !module.certificate_url.is_empty() {
        details.push(("NIST URL:", module.certificate_url.clone(), true));
    }
    if !module.security_policy_url.is_empty() {
        details.push(("Security Policy:", module.security_policy_url.clone(), true));
    }

    for (label, value, is_url) in details {
        if value.is_empty() {
            continue;
        }
        let style = if is_url {
            Style::default()
                .fg(theme.url)
                .add_modifier(Modifier::UNDERLINED)
        } else {
            value_style
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<18}"), label_style),
            Span::styled(value, style),
        ]));
    }

    if !module.description.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Description:", label_style)));
        lines.push(Line::from(Span::styled(
            module.description.clone(),
            value_style,
        )));
    }

    // Algorithms: short tags, or the detailed list when toggled
    if show_algo_details {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Algorithms (Detailed):", label_style)));
        if module.algorithms_detailed.is_empty() {
            lines.push(Line::from(Span::styled(NO_DETAILED_ALGORITHMS, help_style)));
        } else {
            for algo in &module.algorithms_detailed {
                lines.push(Line::from(vec![
                    Span::raw("  • "),
                    Span::styled(algo.clone(), value_style),
                ]));
            }
        }
    } else if !module.algorithms.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Algorithms:", label_style)));
        let mut tags: Vec<Span<'static>> = Vec::new();
        for algo in &module.algorithms {
            tags.push(Span::styled(
                format!(" {algo} "),
                Style::default().fg(theme.normal).bg(theme.algorithm_bg),
            ));
            tags.push(Span::raw(" "));
        }
        lines.push(Line::from(tags));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(DETAIL_HELP, help_style)));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn flatten(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    fn full_module() -> Module {
        Module {
            certificate_number: "4782".to_string(),
            certificate_url: "https://csrc.nist.gov/cert/4782".to_string(),
            vendor_name: "Acme Corp".to_string(),
            module_name: "Acme Crypto Module".to_string(),
            module_type: "Software".to_string(),
            validation_date: NaiveDate::from_ymd_opt(2023, 3, 14),
            status: ModuleStatus::Active,
            standard: "FIPS 140-3".to_string(),
            overall_level: 2,
            sunset_date: "03/13/2028".to_string(),
            caveat: "Export restricted".to_string(),
            embodiment: "Multi-Chip Stand Alone".to_string(),
            description: "General purpose software module".to_string(),
            lab: "ACME LABS".to_string(),
            algorithms: vec!["AES".to_string(), "SHS".to_string()],
            algorithms_detailed: vec!["AES-GCM (Cert. #A1234)".to_string()],
            security_policy_url: "https://csrc.nist.gov/sp/4782.pdf".to_string(),
        }
    }

    #[test]
    fn detail_shows_caveat_and_level_badge() {
        let theme = Theme::dark();
        let text = flatten(&detail_lines(&full_module(), false, &theme)).join("\n");
        assert!(text.contains("CAVEAT:"));
        assert!(text.contains("Export restricted"));
        assert!(text.contains("Level 2"));
        assert!(text.contains("ACTIVE"));
    }

    #[test]
    fn detail_contains_all_nonempty_pairs() {
        let theme = Theme::dark();
        let text = flatten(&detail_lines(&full_module(), false, &theme)).join("\n");
        for needle in [
            "Certificate #:",
            "4782",
            "Vendor:",
            "Acme Corp",
            "Module Type:",
            "Standard:",
            "Embodiment:",
            "Lab:",
            "Validation Date:",
            "March 14, 2023",
            "Sunset Date:",
            "NIST URL:",
            "Security Policy:",
        ] {
            assert!(text.contains(needle), "missing {needle:?}");
        }
    }

    #[test]
    fn detail_skips_empty_pairs_entirely() {
        let theme = Theme::dark();
        let module = Module {
            module_name: "Bare Module".to_string(),
            status: ModuleStatus::InProcess,
            ..Module::default()
        };
        let text = flatten(&detail_lines(&module, false, &theme)).join("\n");
        for absent in [
            "Certificate #:",
            "Standard:",
            "Lab:",
            "Validation Date:",
            "Sunset Date:",
            "NIST URL:",
            "Security Policy:",
            "CAVEAT:",
            "Description:",
            "Level",
        ] {
            assert!(!text.contains(absent), "unexpected {absent:?}");
        }
        assert!(text.contains("Bare Module"));
        assert!(text.contains("IN PROCESS"));
    }

    #[test]
    fn short_algorithm_tags_by_default() {
        let theme = Theme::dark();
        let text = flatten(&detail_lines(&full_module(), false, &theme)).join("\n");
        assert!(text.contains("Algorithms:"));
        assert!(text.contains(" AES "));
        assert!(!text.contains("Algorithms (Detailed):"));
    }

    #[test]
    fn detailed_algorithms_when_toggled() {
        let theme = Theme::dark();
        let text = flatten(&detail_lines(&full_module(), true, &theme)).join("\n");
        assert!(text.contains("Algorithms (Detailed):"));
        assert!(text.contains("AES-GCM (Cert. #A1234)"));
    }

    #[test]
    fn empty_detailed_list_shows_placeholder() {
        let theme = Theme::dark();
        let module = Module {
            algorithms_detailed: Vec::new(),
            ..full_module()
        };
        let text = flatten(&detail_lines(&module, true, &theme)).join("\n");
        assert!(text.contains("(No detailed algorithm data available yet)"));
    }

    #[test]
    fn help_line_names_the_toggle_keys() {
        let theme = Theme::dark();
        let lines = detail_lines(&full_module(), false, &theme);
        let last = flatten(&lines).pop().unwrap();
        assert!(last.contains("ESC"));
        assert!(last.contains("toggle algorithm details"));
    }

    #[test]
    fn level_badge_empty_for_unrated() {
        let theme = Theme::dark();
        assert_eq!(level_badge(0, &theme).content.as_ref(), "");
        assert_eq!(level_badge(3, &theme).content.as_ref(), " Level 3 ");
    }

    #[test]
    fn status_badge_labels() {
        let theme = Theme::dark();
        assert_eq!(
            status_badge(ModuleStatus::Historical, &theme).content.as_ref(),
            " HISTORICAL "
        );
    }

    #[test]
    fn inset_clamps_on_tiny_areas() {
        let tiny = Rect::new(0, 0, 3, 1);
        let inner = inset(tiny, 2, 1);
        assert!(inner.width <= tiny.width);
        assert!(inner.height <= tiny.height);
    }
}

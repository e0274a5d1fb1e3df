use super::ClientReport;
use crate::billing::calculator::format_duration;
use crate::billing::QuotaStatus;
use crate::config::SectionsConfig;

/// One block of the text report
pub trait Section {
    fn render(&self, report: &ClientReport) -> Vec<String>;
    fn enabled(&self) -> bool;
}

fn eur(amount: f64) -> String {
    format!("€{:.2}", amount)
}

fn pct(value: f64) -> String {
    format!("{:.1}%", value)
}

pub struct UsageSection {
    enabled: bool,
}

impl UsageSection {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn status_label(status: QuotaStatus) -> &'static str {
        match status {
            QuotaStatus::Exceeded => "EXCEEDED",
            QuotaStatus::Danger => "danger",
            QuotaStatus::Warning => "warning",
            QuotaStatus::Normal => "ok",
        }
    }
}

impl Section for UsageSection {
    fn render(&self, report: &ClientReport) -> Vec<String> {
        let usage = &report.usage;
        let mut lines = vec![format!(
            "Usage          {:.2} min · {} of {} · {} · {}",
            usage.minutes,
            eur(usage.used_cost),
            eur(usage.included_cost),
            pct(usage.percentage_used),
            Self::status_label(usage.status)
        )];

        if usage.overage_billable > 0.0 {
            lines.push(format!(
                "Overage        {} raw · {} billable (+{:.0}% markup)",
                eur(usage.overage_cost_raw),
                eur(usage.overage_billable),
                report.overage_markup * 100.0
            ));
        }

        if report.minute_quota_percentage > 0.0 {
            lines.push(format!(
                "Minute quota   {:.0}% of monthly limit",
                report.minute_quota_percentage
            ));
        }

        lines
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

pub struct ProjectionSection {
    enabled: bool,
}

impl ProjectionSection {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Section for ProjectionSection {
    fn render(&self, report: &ClientReport) -> Vec<String> {
        let p = &report.projection;
        vec![format!(
            "Projection     {:.0} min · {} · overage {} ({:.1} calls/day, {:.1} min/day, {} days left)",
            p.projected_minutes,
            eur(p.projected_cost),
            eur(p.projected_overage),
            p.avg_calls_per_day,
            p.avg_minutes_per_day,
            p.days_remaining
        )]
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

pub struct GoldenWindowSection {
    enabled: bool,
}

impl GoldenWindowSection {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Section for GoldenWindowSection {
    fn render(&self, report: &ClientReport) -> Vec<String> {
        let gw = &report.golden_window;
        vec![format!(
            "Golden window  {} within {:.0}s ({} in, {} out) · median {}",
            pct(gw.percentage),
            report.golden_window_seconds,
            gw.within_window,
            gw.outside_window,
            format_duration(gw.median_response_time)
        )]
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

pub struct ConversionSection {
    enabled: bool,
}

impl ConversionSection {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Section for ConversionSection {
    fn render(&self, report: &ClientReport) -> Vec<String> {
        let c = &report.conversion;
        vec![
            format!(
                "Conversion     {} · {} appointments · {} qualified · {} not interested",
                pct(c.conversion_rate),
                c.appointments,
                c.qualified,
                c.not_interested
            ),
            format!("Est. revenue   {}", eur(report.estimated_revenue)),
        ]
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

pub struct SentimentSection {
    enabled: bool,
}

impl SentimentSection {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Section for SentimentSection {
    fn render(&self, report: &ClientReport) -> Vec<String> {
        let s = &report.sentiment;
        vec![format!(
            "Sentiment      {} positive · {} neutral · {} negative · avg {:.2}",
            s.positive, s.neutral, s.negative, s.average
        )]
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

pub struct AgentsSection {
    enabled: bool,
}

impl AgentsSection {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Section for AgentsSection {
    fn render(&self, report: &ClientReport) -> Vec<String> {
        report
            .agents
            .iter()
            .map(|a| {
                format!(
                    "  {:<20} {:>4} calls · {:>8.0} min · {:>10} · {}",
                    a.agent_name,
                    a.calls,
                    a.minutes,
                    eur(a.cost),
                    pct(a.share_of_cost)
                )
            })
            .collect()
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

pub struct TimelineSection {
    enabled: bool,
}

impl TimelineSection {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Section for TimelineSection {
    fn render(&self, report: &ClientReport) -> Vec<String> {
        report
            .daily
            .iter()
            .map(|d| {
                format!(
                    "  {} {:>4} calls · {:>4} ok · {:>4} failed · {:.1} min",
                    d.date.format("%d %b"),
                    d.calls,
                    d.successful,
                    d.failed,
                    d.minutes
                )
            })
            .collect()
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

/// All sections in display order
pub fn collect_sections(config: &SectionsConfig) -> Vec<Box<dyn Section>> {
    vec![
        Box::new(UsageSection::new(config.usage)),
        Box::new(ProjectionSection::new(config.projection)),
        Box::new(GoldenWindowSection::new(config.golden_window)),
        Box::new(ConversionSection::new(config.conversion)),
        Box::new(SentimentSection::new(config.sentiment)),
        Box::new(AgentsSection::new(config.agents)),
        Box::new(TimelineSection::new(config.timeline)),
    ]
}

/// Render the enabled sections under a one-line header
pub fn render_text(report: &ClientReport, config: &SectionsConfig) -> String {
    let mut lines = vec![format!(
        "{} · {} · {} → {} · {} calls",
        report.company_name,
        report.plan_name,
        report.period_start.format("%Y-%m-%d"),
        report.period_end.format("%Y-%m-%d"),
        report.calls
    )];

    for section in collect_sections(config) {
        if section.enabled() {
            lines.extend(section.render(report));
        }
    }

    lines.join("\n")
}

//! Final report and its text/JSON rendering.

use crate::aggregator::RunningTotals;
use crate::config::{MissingValues, OutputFormat, SummarySource};
use crate::summary::ChannelSummary;
use serde_json::{Map, Value};

/// One printed metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metric {
    pub key: &'static str,
    pub label: &'static str,
    pub value: Option<u64>,
}

/// Everything gathered in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelReport {
    pub summary: ChannelSummary,
    pub totals: RunningTotals,
    pub summary_source: SummarySource,
}

impl ChannelReport {
    pub fn new(
        summary: ChannelSummary,
        totals: RunningTotals,
        summary_source: SummarySource,
    ) -> Self {
        Self {
            summary,
            totals,
            summary_source,
        }
    }

    /// True when the channel summary could not be fully fetched.
    pub fn summary_failed(&self) -> bool {
        self.summary.degraded
    }

    /// Metrics in print order. Guest count only exists for the details summary.
    pub fn metrics(&self) -> Vec<Metric> {
        let mut metrics = vec![Metric {
            key: "member_count",
            label: "Member Count",
            value: self.summary.member_count,
        }];

        if self.summary_source == SummarySource::Details {
            metrics.push(Metric {
                key: "guest_count",
                label: "Guest Count",
                value: self.summary.guest_count,
            });
        }

        metrics.extend([
            Metric {
                key: "pinned_post_count",
                label: "Pinned Post Count",
                value: self.summary.pinned_post_count,
            },
            Metric {
                key: "files_count",
                label: "Files Count",
                value: Some(self.totals.total_files),
            },
            Metric {
                key: "total_posts",
                label: "Total Posts",
                value: Some(self.totals.total_posts),
            },
            Metric {
                key: "total_replies",
                label: "Total Replies",
                value: Some(self.totals.total_replies),
            },
            Metric {
                key: "total_reactions",
                label: "Total Reactions",
                value: Some(self.totals.total_reactions),
            },
        ]);

        metrics
    }

    pub fn render(&self, format: OutputFormat, missing: MissingValues) -> String {
        match format {
            OutputFormat::Text => self.render_text(missing),
            OutputFormat::Json => self.render_json(missing),
        }
    }

    fn render_text(&self, missing: MissingValues) -> String {
        self.metrics()
            .iter()
            .map(|metric| {
                let value = match (metric.value, missing) {
                    (Some(v), _) => v.to_string(),
                    (None, MissingValues::Zero) => "0".to_string(),
                    (None, MissingValues::Unavailable) => "unavailable".to_string(),
                };
                format!("{}: {value}", metric.label)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Keys keep the text output's order.
    fn render_json(&self, missing: MissingValues) -> String {
        let object: Map<String, Value> = self
            .metrics()
            .iter()
            .map(|metric| {
                let value = match (metric.value, missing) {
                    (Some(v), _) => Value::from(v),
                    (None, MissingValues::Zero) => Value::from(0u64),
                    (None, MissingValues::Unavailable) => Value::Null,
                };
                (metric.key.to_string(), value)
            })
            .collect();

        serde_json::to_string_pretty(&Value::Object(object))
            .unwrap_or_else(|_| "{}".to_string())
    }
}

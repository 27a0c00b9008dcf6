//! In-process usage counters behind `/api/analytics/summary`. Nothing is persisted.

use chrono::NaiveDate;
use lru::LruCache;
use serde::Serialize;
use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Latency samples kept for the rolling average
pub const LATENCY_WINDOW: usize = 256;
pub const TOP_SYMPTOMS: usize = 5;
/// Distinct phrases tracked; the least recently seen is evicted past this
pub const TOP_PHRASE_CAPACITY: usize = 10_000;

#[derive(Debug)]
pub struct Analytics {
    total_analyses: u64,
    day: NaiveDate,
    analyses_today: u64,
    phrase_counts: LruCache<String, u64>, // bounded, clients control the keys
    latencies: VecDeque<f64>, // seconds, ring buffer
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymptomCount {
    pub symptom: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub total_analyses: u64,
    pub analyses_today: u64,
    pub most_common_symptoms: Vec<SymptomCount>,
    pub average_response_time: String,
    pub system_status: &'static str,
}

impl Analytics {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            total_analyses: 0,
            day: today,
            analyses_today: 0,
            phrase_counts: LruCache::new(
                NonZeroUsize::new(TOP_PHRASE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            ),
            latencies: VecDeque::with_capacity(LATENCY_WINDOW),
        }
    }

    fn roll_day(&mut self, today: NaiveDate) {
        if today != self.day {
            self.day = today;
            self.analyses_today = 0;
        }
    }

    /// Count one successful analysis and the phrases it produced
    pub fn record_analysis(&mut self, phrases: &[String], today: NaiveDate) {
        self.roll_day(today);
        self.total_analyses = self.total_analyses.saturating_add(1);
        self.analyses_today = self.analyses_today.saturating_add(1);
        for phrase in phrases {
            match self.phrase_counts.get_mut(phrase) {
                Some(count) => *count += 1,
                None => {
                    self.phrase_counts.put(phrase.clone(), 1);
                }
            }
        }
    }

    pub fn record_latency(&mut self, seconds: f64) {
        if self.latencies.len() == LATENCY_WINDOW {
            self.latencies.pop_front();
        }
        self.latencies.push_back(seconds);
    }

    pub fn summary(&mut self, today: NaiveDate) -> AnalyticsSummary {
        self.roll_day(today);

        let mut counts: Vec<(&String, &u64)> = self.phrase_counts.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        let most_common_symptoms = counts
            .into_iter()
            .take(TOP_SYMPTOMS)
            .map(|(symptom, count)| SymptomCount {
                symptom: symptom.clone(),
                count: *count,
            })
            .collect();

        let average_response_time = if self.latencies.is_empty() {
            "0.0s".to_string()
        } else {
            let avg = self.latencies.iter().sum::<f64>() / self.latencies.len() as f64;
            format!("{avg:.3}s")
        };

        AnalyticsSummary {
            total_analyses: self.total_analyses,
            analyses_today: self.analyses_today,
            most_common_symptoms,
            average_response_time,
            system_status: "operational",
        }
    }
}

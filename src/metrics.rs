//! Prometheus metrics for the HTTP surface and the evaluation pipeline

use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};

use crate::models::decision::Outcome;
use crate::models::pillar::Pillar;

pub struct Metrics {
    registry: Registry,

    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,

    /// Completed evaluations by outcome
    pub evaluations_total: IntCounterVec,
    /// Evaluations that produced no decision, by error kind
    pub evaluation_failures_total: IntCounterVec,
    /// Scorer calls by pillar and result ("ok" or the failure kind)
    pub scorer_calls_total: IntCounterVec,
    pub scorer_duration_seconds: HistogramVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::with_opts(Opts::new("http_requests_total", "Total HTTP requests"))?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request duration in seconds",
        ))?;
        let http_requests_in_flight = IntGauge::with_opts(Opts::new(
            "http_requests_in_flight",
            "HTTP requests currently being served",
        ))?;

        let evaluations_total = IntCounterVec::new(
            Opts::new("evaluations_total", "Completed evaluations by outcome"),
            &["outcome"],
        )?;
        let evaluation_failures_total = IntCounterVec::new(
            Opts::new(
                "evaluation_failures_total",
                "Evaluations that ended without a decision",
            ),
            &["kind"],
        )?;
        let scorer_calls_total = IntCounterVec::new(
            Opts::new("scorer_calls_total", "Scorer calls by pillar and result"),
            &["pillar", "result"],
        )?;
        let scorer_duration_seconds = HistogramVec::new(
            HistogramOpts::new("scorer_duration_seconds", "Scorer call latency in seconds")
                .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
            &["pillar"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(evaluations_total.clone()))?;
        registry.register(Box::new(evaluation_failures_total.clone()))?;
        registry.register(Box::new(scorer_calls_total.clone()))?;
        registry.register(Box::new(scorer_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            evaluations_total,
            evaluation_failures_total,
            scorer_calls_total,
            scorer_duration_seconds,
        })
    }

    /// Count one request as in flight until the returned guard is dropped,
    /// including when the request future is abandoned mid-way.
    pub fn track_in_flight(&self) -> InFlightGuard {
        self.http_requests_in_flight.inc();
        InFlightGuard {
            gauge: self.http_requests_in_flight.clone(),
        }
    }

    pub fn record_outcome(&self, outcome: Outcome) {
        self.evaluations_total
            .with_label_values(&[outcome.as_str()])
            .inc();
    }

    pub fn record_failure(&self, kind: &str) {
        self.evaluation_failures_total
            .with_label_values(&[kind])
            .inc();
    }

    pub fn record_scorer_call(&self, pillar: Pillar, result: &str, seconds: f64) {
        self.scorer_calls_total
            .with_label_values(&[pillar.key(), result])
            .inc();
        self.scorer_duration_seconds
            .with_label_values(&[pillar.key()])
            .observe(seconds);
    }

    /// Render all metrics in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

pub struct InFlightGuard {
    gauge: IntGauge,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.gauge.dec();
    }
}

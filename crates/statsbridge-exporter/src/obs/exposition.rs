//! Prometheus text exposition (format 0.0.4).
//!
//! Samples sharing a descriptor name form one family; HELP/TYPE are written
//! once per family in order of first appearance. Labels come out sorted.

use std::fmt::Write;

use crate::collector::Sample;

/// Content type for the text format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".into()
    } else if v == f64::INFINITY {
        "+Inf".into()
    } else if v == f64::NEG_INFINITY {
        "-Inf".into()
    } else {
        v.to_string()
    }
}

/// Render samples in Prometheus text exposition format.
pub fn render(samples: &[Sample]) -> String {
    let mut out = String::new();
    let mut families: Vec<&str> = Vec::new();

    for s in samples {
        let name = s.desc.fq_name();
        if families.contains(&name) {
            continue;
        }
        families.push(name);

        let _ = writeln!(out, "# HELP {} {}", name, escape_help(s.desc.help()));
        let _ = writeln!(out, "# TYPE {} {}", name, s.desc.kind().as_str());
        for m in samples.iter().filter(|m| m.desc.fq_name() == name) {
            write_sample(&mut out, m);
        }
    }
    out
}

fn write_sample(out: &mut String, s: &Sample) {
    let labels = s.desc.const_labels();
    if labels.is_empty() {
        let _ = writeln!(out, "{} {}", s.desc.fq_name(), format_value(s.value));
        return;
    }
    let label_str = labels
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",");
    let _ = writeln!(out, "{}{{{}}} {}", s.desc.fq_name(), label_str, format_value(s.value));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{MetricDescriptor, ValueKind};

    #[test]
    fn renders_families_with_headers() {
        let up = MetricDescriptor::new(
            "httpserver_up",
            "Last query successful.",
            &[],
            ValueKind::Gauge,
        );
        let c = MetricDescriptor::new(
            "http_request_200counter",
            "http.requests.counter",
            &[("counter", "twohundred")],
            ValueKind::Counter,
        );
        let out = render(&[Sample::new(&up, 1.0), Sample::new(&c, 3.0)]);
        assert_eq!(
            out,
            "# HELP httpserver_up Last query successful.\n\
             # TYPE httpserver_up gauge\n\
             httpserver_up 1\n\
             # HELP http_request_200counter http.requests.counter\n\
             # TYPE http_request_200counter counter\n\
             http_request_200counter{counter=\"twohundred\"} 3\n"
        );
    }

    #[test]
    fn groups_samples_of_one_family() {
        let a = MetricDescriptor::new("m", "h", &[("k", "a")], ValueKind::Gauge);
        let b = MetricDescriptor::new("m", "h", &[("k", "b")], ValueKind::Gauge);
        let other = MetricDescriptor::new("n", "h", &[], ValueKind::Gauge);
        let out = render(&[Sample::new(&a, 1.0), Sample::new(&other, 2.0), Sample::new(&b, 3.0)]);
        assert_eq!(out.matches("# TYPE m gauge").count(), 1);
        let m_a = out.find("m{k=\"a\"} 1").unwrap();
        let m_b = out.find("m{k=\"b\"} 3").unwrap();
        let n = out.find("n 2").unwrap();
        assert!(m_a < m_b && m_b < n);
    }

    #[test]
    fn escapes_and_special_values() {
        let d = MetricDescriptor::new(
            "m",
            "line\none \\",
            &[("path", "a\"b\\c")],
            ValueKind::Gauge,
        );
        let out = render(&[Sample::new(&d, f64::NAN)]);
        assert!(out.contains("# HELP m line\\none \\\\\n"));
        assert!(out.contains("m{path=\"a\\\"b\\\\c\"} NaN\n"));
        assert_eq!(format_value(f64::INFINITY), "+Inf");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Inf");
        assert_eq!(format_value(0.5), "0.5");
    }
}

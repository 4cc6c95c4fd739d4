use std::io::{self, Write};

use kursy_core::Envelope;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    write_envelope(&mut writer, envelope, format, pretty)?;
    writer.flush()?;
    Ok(())
}

fn write_envelope<W: Write>(
    writer: &mut W,
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => writeln!(writer, "{}", envelope.to_json(pretty)?)?,
        OutputFormat::Table => {
            for line in table_lines(envelope)? {
                writeln!(writer, "{line}")?;
            }
        }
    }

    Ok(())
}

fn table_lines(envelope: &Envelope<Value>) -> Result<Vec<String>, CliError> {
    let mut lines = Vec::new();
    let data = &envelope.data;

    if let Some(display) = data["display"].as_str() {
        lines.push(display.to_owned());
    } else if let Some(currencies) = data["currencies"].as_array() {
        for currency in currencies {
            lines.push(format!(
                "{:<6}{}",
                currency["code"].as_str().unwrap_or_default(),
                currency["display_name"].as_str().unwrap_or_default()
            ));
        }
    } else if let (Some(labels), Some(values)) =
        (data["labels"].as_array(), data["values"].as_array())
    {
        lines.push(data["label"].as_str().unwrap_or_default().to_owned());
        for (label, value) in labels.iter().zip(values) {
            lines.push(format!(
                "{}  {:.4}",
                label.as_str().unwrap_or_default(),
                value.as_f64().unwrap_or_default()
            ));
        }
    } else if !data.is_null() {
        lines.extend(serde_json::to_string_pretty(data)?.lines().map(str::to_owned));
    }

    for warning in &envelope.meta.warnings {
        lines.push(format!("warning: {warning}"));
    }
    for error in &envelope.errors {
        lines.push(format!("error: {}: {}", error.code, error.message));
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kursy_core::{CurrencyCode, EnvelopeError, EnvelopeMeta, RateError};
    use serde_json::json;

    fn envelope(data: Value) -> Envelope<Value> {
        Envelope::with_errors(EnvelopeMeta::generate(1), data, Vec::new()).expect("valid envelope")
    }

    #[test]
    fn conversion_prints_presentation_string() {
        let lines = table_lines(&envelope(json!({ "display": "100 USD = 403.54 PLN" })))
            .expect("renders");
        assert_eq!(lines, vec!["100 USD = 403.54 PLN"]);
    }

    #[test]
    fn history_prints_one_row_per_point() {
        let mut envelope = envelope(json!({
            "label": "USD/EUR",
            "labels": ["2024-01-02", "2024-01-03"],
            "values": [0.909090909, 0.911111],
        }));
        envelope.meta.push_warning("1 positional pair(s) combine rates from different dates");

        let lines = table_lines(&envelope).expect("renders");
        assert_eq!(
            lines,
            vec![
                "USD/EUR",
                "2024-01-02  0.9091",
                "2024-01-03  0.9111",
                "warning: 1 positional pair(s) combine rates from different dates",
            ]
        );
    }

    #[test]
    fn failures_print_error_codes() {
        let error = EnvelopeError::from(&RateError::RateNotFound {
            code: CurrencyCode::parse("XYZ").expect("valid code"),
        });
        let envelope = Envelope::with_errors(EnvelopeMeta::generate(1), Value::Null, vec![error])
            .expect("valid envelope");

        let lines = table_lines(&envelope).expect("renders");
        assert_eq!(
            lines,
            vec!["error: rate.not_found: no rate published for 'XYZ' in table A or B"]
        );
    }

    #[test]
    fn json_output_is_one_line_unless_pretty() {
        let envelope = envelope(json!({ "display": "1 PLN = 1.00 PLN" }));

        let mut compact = Vec::new();
        write_envelope(&mut compact, &envelope, OutputFormat::Json, false).expect("writes");
        let compact = String::from_utf8(compact).expect("utf-8");
        assert_eq!(compact.lines().count(), 1);
        assert!(compact.contains("\"display\":\"1 PLN = 1.00 PLN\""));

        let mut pretty = Vec::new();
        write_envelope(&mut pretty, &envelope, OutputFormat::Json, true).expect("writes");
        assert!(String::from_utf8(pretty).expect("utf-8").lines().count() > 1);
    }

    #[test]
    fn closed_output_surfaces_as_io_error() {
        struct ClosedPipe;

        impl Write for ClosedPipe {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::from(io::ErrorKind::BrokenPipe))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let error = write_envelope(
            &mut ClosedPipe,
            &envelope(json!({ "display": "x" })),
            OutputFormat::Table,
            false,
        )
        .expect_err("write must fail");
        assert!(matches!(error, CliError::Io(_)));
        assert_eq!(error.exit_code(), 10);
    }
}

use chrono::Utc;
use serde::Serialize;
use sparkline_rs::api::{SparklineConfig, SparklineKind, render_sparkline};
use sparkline_rs::core::TimeInterval;
use sparkline_rs::loader::decode_series;
use sparkline_rs::render::{NullRenderer, Renderer};
use sparkline_rs::telemetry;
use std::fs;
use std::path::PathBuf;

#[derive(Debug)]
struct CliArgs {
    kind: SparklineKind,
    input: PathBuf,
    config: Option<PathBuf>,
    interval: Option<TimeInterval>,
    time_column: String,
    value_column: String,
    brush: Option<(f64, f64)>,
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ProbeSummary {
    kind: SparklineKind,
    interval: TimeInterval,
    observations: usize,
    plotted: usize,
    y_domain: (f64, f64),
    highlights: Vec<(String, f64)>,
    brush_domain: Option<(String, String)>,
    brush_selected: usize,
    lines: usize,
    rects: usize,
    points: usize,
    texts: usize,
}

const USAGE: &str = "usage: sparkline_probe <line|column> --input <csv> [--config <json>] \
[--interval <name>] [--time-column <name>] [--value-column <name>] [--brush <p0,p1>] \
[--output <path>]";

fn main() {
    let _ = telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            serde_json::from_str::<SparklineConfig>(&raw)
                .map_err(|err| format!("invalid config json: {err}"))?
        }
        None => SparklineConfig::default(),
    };
    if let Some(interval) = args.interval {
        config = config.with_interval(interval);
    }

    let body = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let series = decode_series(&body, &args.time_column, &args.value_column)
        .map_err(|err| err.to_string())?;

    let rendered = render_sparkline(&series, args.kind, &config, &Utc, &args.brush)
        .map_err(|err| err.to_string())?;
    let mut renderer = NullRenderer::default();
    renderer
        .render(&rendered.frame)
        .map_err(|err| err.to_string())?;

    let layer = rendered.layers.first();
    let summary = ProbeSummary {
        kind: args.kind,
        interval: config.interval,
        observations: series.len(),
        plotted: layer.map_or(0, |layer| layer.series.len()),
        y_domain: rendered.y_scale.domain(),
        highlights: layer
            .map(|layer| {
                layer
                    .highlights
                    .iter()
                    .map(|highlight| (highlight.time.to_rfc3339(), highlight.value))
                    .collect()
            })
            .unwrap_or_default(),
        brush_domain: layer
            .and_then(|layer| layer.brush.domain)
            .map(|(start, end)| (start.to_rfc3339(), end.to_rfc3339())),
        brush_selected: layer.map_or(0, |layer| layer.brush.selected.len()),
        lines: renderer.last_line_count,
        rects: renderer.last_rect_count,
        points: renderer.last_point_count,
        texts: renderer.last_text_count,
    };

    let json = serde_json::to_string_pretty(&summary)
        .map_err(|err| format!("failed to serialize summary: {err}"))?;
    match &args.output {
        Some(path) => fs::write(path, format!("{json}\n"))
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let kind = match args.next().as_deref() {
        Some("line") => SparklineKind::Line,
        Some("column") => SparklineKind::Column,
        _ => return Err(USAGE.to_owned()),
    };

    let mut input = None::<PathBuf>;
    let mut config = None::<PathBuf>;
    let mut interval = None::<TimeInterval>;
    let mut time_column = "time".to_owned();
    let mut value_column = "value".to_owned();
    let mut brush = None::<(f64, f64)>;
    let mut output = None::<PathBuf>;

    while let Some(flag) = args.next() {
        let value = args
            .next()
            .ok_or_else(|| format!("missing value for {flag}"))?;
        match flag.as_str() {
            "--input" => input = Some(PathBuf::from(value)),
            "--config" => config = Some(PathBuf::from(value)),
            "--interval" => {
                interval = Some(value.parse().map_err(|err| format!("{err}"))?);
            }
            "--time-column" => time_column = value,
            "--value-column" => value_column = value,
            "--brush" => brush = Some(parse_brush(&value)?),
            "--output" => output = Some(PathBuf::from(value)),
            _ => return Err(format!("unknown flag `{flag}`\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        kind,
        input: input.ok_or_else(|| format!("missing --input\n{USAGE}"))?,
        config,
        interval,
        time_column,
        value_column,
        brush,
        output,
    })
}

fn parse_brush(raw: &str) -> Result<(f64, f64), String> {
    let (p0, p1) = raw
        .split_once(',')
        .ok_or_else(|| format!("brush must be `p0,p1`, got `{raw}`"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|err| format!("invalid brush pixel `{part}`: {err}"))
    };
    Ok((parse(p0)?, parse(p1)?))
}

//! `burnup scope <SCHEDULE>`: check a scope schedule before using it.

use std::io::{self, Write};

use burnup_core::report::{Point, ScopeSpec};
use clap::Args;
use serde::Serialize;

use crate::output::{OutputMode, pretty_kv, pretty_section, render};

/// Arguments for `burnup scope`.
#[derive(Args, Debug)]
pub struct ScopeArgs {
    /// Points, or a `day,value[;day,value...]` schedule (`+n`/`-n` are relative).
    #[arg(allow_hyphen_values = true)]
    pub schedule: String,

    /// Day the scope line is extended to.
    #[arg(long, default_value_t = 0)]
    pub end_day: i64,
}

#[derive(Debug, Serialize)]
struct ScopeOutput<'a> {
    scope: &'a ScopeSpec,
    total: i64,
    end_day: i64,
    step_line: Vec<Point<i64>>,
}

/// Execute `burnup scope`.
pub fn run_scope(args: &ScopeArgs, output: OutputMode) -> anyhow::Result<()> {
    let scope: ScopeSpec = args.schedule.parse()?;
    let step_line = scope.step_line(args.end_day);
    let end_day = step_line.last().map_or(args.end_day, |p| p.day);

    let value = ScopeOutput {
        scope: &scope,
        total: scope.total(),
        end_day,
        step_line,
    };
    render(output, &value, write_human)
}

fn describe(scope: &ScopeSpec) -> String {
    match scope {
        ScopeSpec::Fixed(points) => format!("{points} (fixed)"),
        ScopeSpec::Schedule(schedule) => schedule.to_string(),
    }
}

fn write_human(value: &ScopeOutput<'_>, mode: OutputMode, w: &mut dyn Write) -> io::Result<()> {
    if mode.is_pretty() {
        pretty_section(w, "Scope")?;
        pretty_kv(w, "Schedule", describe(value.scope))?;
        pretty_kv(w, "Total", value.total.to_string())?;
        pretty_kv(w, "End day", value.end_day.to_string())?;
        writeln!(w)?;
        pretty_section(w, "Step line")?;
    }
    for point in &value.step_line {
        writeln!(w, "{}\t{}", point.day, point.value)?;
    }
    Ok(())
}

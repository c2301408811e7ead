#![forbid(unsafe_code)]

//! Attendance panel data.
//!
//! Two pure transformations feed the panel: a fixed summary matrix
//! keyed by population and period, and the distribution aggregation
//! that surfaces the six groups with the lowest attendance so staff
//! know where to act first.

use crate::user::{Staff, Student};

/// Which population the panel is summarizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Population {
    /// Enrolled students.
    Students,
    /// Teaching staff.
    Teachers,
}

impl Population {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Population::Students => "Estudiantes",
            Population::Teachers => "Docentes",
        }
    }
}

/// Reporting period for the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// Current day.
    Today,
    /// Current week.
    Week,
    /// Current month.
    Month,
    /// Current two-month term.
    Term,
}

impl Period {
    /// All periods in display order.
    pub const ALL: [Period; 4] = [Period::Today, Period::Week, Period::Month, Period::Term];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Period::Today => "Hoy",
            Period::Week => "Semana",
            Period::Month => "Mes",
            Period::Term => "Bimestre",
        }
    }
}

/// One cell of the summary matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryMetrics {
    /// Overall attendance percentage.
    pub attendance: u8,
    /// Change versus the previous period, in percentage points.
    pub delta: i8,
    /// Total recorded absences.
    pub absences: u32,
    /// Total recorded late arrivals.
    pub tardiness: u32,
    /// Share of courses with a complete teacher register.
    pub coverage: u8,
}

/// Visual accent for a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    /// Trending well.
    Positive,
    /// Needs attention.
    Negative,
    /// No judgement.
    Neutral,
}

impl SummaryMetrics {
    /// Accent for the attendance figure: positive while not declining.
    #[must_use]
    pub const fn attendance_accent(&self) -> Accent {
        if self.delta >= 0 {
            Accent::Positive
        } else {
            Accent::Negative
        }
    }

    /// Absences always read as something to reduce.
    #[must_use]
    pub const fn absences_accent(&self) -> Accent {
        Accent::Negative
    }

    /// Accent for tardiness: negative as soon as any were recorded.
    #[must_use]
    pub const fn tardiness_accent(&self) -> Accent {
        if self.tardiness > 0 {
            Accent::Negative
        } else {
            Accent::Neutral
        }
    }

    /// Accent for register coverage against the institutional goal.
    #[must_use]
    pub const fn coverage_accent(&self) -> Accent {
        if self.coverage >= COVERAGE_GOAL {
            Accent::Positive
        } else {
            Accent::Neutral
        }
    }

    /// Helper line shown under the coverage figure.
    #[must_use]
    pub const fn coverage_helper(&self) -> &'static str {
        if self.coverage >= COVERAGE_GOAL {
            "Meta alcanzada."
        } else {
            "Meta institucional: 95%."
        }
    }
}

/// Institutional goal for complete teacher registers, in percent.
pub const COVERAGE_GOAL: u8 = 95;

/// Fixed summary matrix for the current school year.
#[must_use]
pub const fn summary_for(population: Population, period: Period) -> SummaryMetrics {
    use Period::*;
    use Population::*;
    let (attendance, delta, absences, tardiness, coverage) = match (population, period) {
        (Students, Today) => (92, -2, 18, 24, 87),
        (Students, Week) => (93, 1, 74, 92, 89),
        (Students, Month) => (95, 2, 240, 310, 91),
        (Students, Term) => (94, 0, 520, 672, 92),
        (Teachers, Today) => (97, 1, 2, 5, 93),
        (Teachers, Week) => (96, -1, 12, 18, 94),
        (Teachers, Month) => (95, 0, 40, 54, 95),
        (Teachers, Term) => (96, 1, 86, 120, 96),
    };
    SummaryMetrics {
        attendance,
        delta,
        absences,
        tardiness,
        coverage,
    }
}

/// Format a delta as shown under the attendance figure:
/// an explicit `+` for improvements, none otherwise.
#[must_use]
pub fn format_delta(delta: i8) -> String {
    if delta > 0 {
        format!("+{delta}% vs periodo anterior")
    } else {
        format!("{delta}% vs periodo anterior")
    }
}

/// One bar of the distribution panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupAttendance {
    /// Group label: `"{grade} · {section}"` for students, the area (or
    /// role, or "General") for staff.
    pub name: String,
    /// Average attendance percentage, rounded.
    pub attendance: u8,
}

/// How many groups the distribution panel shows.
const DISTRIBUTION_LIMIT: usize = 6;

/// Aggregate student attendance by grade-section.
///
/// Groups keep first-seen order, a missing percentage counts as zero,
/// and the result is the `DISTRIBUTION_LIMIT` lowest averages in
/// ascending order (stable for ties).
#[must_use]
pub fn student_distribution(students: &[Student]) -> Vec<GroupAttendance> {
    let keyed = students.iter().map(|student| {
        (
            format!("{} · {}", student.grade, student.section),
            u32::from(student.attendance_percentage.unwrap_or(0)),
        )
    });
    aggregate(keyed)
}

/// Aggregate staff attendance by area, falling back to role, then to
/// a catch-all group.
#[must_use]
pub fn staff_distribution(staff: &[Staff]) -> Vec<GroupAttendance> {
    let keyed = staff.iter().map(|person| {
        let name = person
            .area
            .clone()
            .or_else(|| person.role.clone())
            .unwrap_or_else(|| "General".to_string());
        (name, u32::from(person.attendance_percentage.unwrap_or(0)))
    });
    aggregate(keyed)
}

fn aggregate(entries: impl Iterator<Item = (String, u32)>) -> Vec<GroupAttendance> {
    // Vec keeps first-seen group order; rosters are small.
    let mut groups: Vec<(String, u32, u32)> = Vec::new();
    for (name, pct) in entries {
        match groups.iter_mut().find(|(existing, _, _)| *existing == name) {
            Some((_, total, sum)) => {
                *total += 1;
                *sum += pct;
            }
            None => groups.push((name, 1, pct)),
        }
    }

    let mut out: Vec<GroupAttendance> = groups
        .into_iter()
        .map(|(name, total, sum)| GroupAttendance {
            name,
            attendance: round_ratio(sum, total),
        })
        .collect();
    out.sort_by_key(|group| group.attendance);
    out.truncate(DISTRIBUTION_LIMIT);
    out
}

fn round_ratio(sum: u32, total: u32) -> u8 {
    let total = total.max(1);
    let rounded = (f64::from(sum) / f64::from(total)).round();
    rounded as u8
}

#![forbid(unsafe_code)]

//! Roster records.
//!
//! A [`UserRecord`] is an explicit sum type over the two populations the
//! dashboard manages. Code that needs to branch on the population
//! matches on [`UserRecord::kind`] exhaustively; there is no structural
//! duck-typing anywhere.

/// Which population a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserKind {
    /// An enrolled student.
    Student,
    /// A staff member (teaching or administrative).
    Staff,
}

/// An enrolled student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// National identity document number. Unique per student.
    pub document_number: String,
    /// Internal enrollment code.
    pub student_code: String,
    /// Full display name.
    pub full_name: String,
    /// Grade level, e.g. `"5"`.
    pub grade: String,
    /// Section letter within the grade, e.g. `"A"`.
    pub section: String,
    /// Attendance percentage for the current period, when recorded.
    pub attendance_percentage: Option<u8>,
    /// Late arrivals in the current period.
    pub tardiness_count: u32,
}

impl Student {
    /// The grade-section code this student belongs to, e.g. `"5A"`.
    #[must_use]
    pub fn grade_code(&self) -> String {
        format!("{}{}", self.grade, self.section)
    }
}

/// A staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staff {
    /// National identity document number.
    pub dni: String,
    /// Display name.
    pub name: String,
    /// Department or curricular area, when assigned.
    pub area: Option<String>,
    /// Role title, when assigned.
    pub role: Option<String>,
    /// Attendance percentage for the current period, when recorded.
    pub attendance_percentage: Option<u8>,
}

/// A roster entry: student or staff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRecord {
    /// Student variant.
    Student(Student),
    /// Staff variant.
    Staff(Staff),
}

impl UserRecord {
    /// The population discriminant.
    #[must_use]
    pub const fn kind(&self) -> UserKind {
        match self {
            UserRecord::Student(_) => UserKind::Student,
            UserRecord::Staff(_) => UserKind::Staff,
        }
    }

    /// The default display name used by search and tables:
    /// students show their full name, staff their name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            UserRecord::Student(student) => &student.full_name,
            UserRecord::Staff(staff) => &staff.name,
        }
    }

    /// Stable identifier: document number for students, DNI for staff.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            UserRecord::Student(student) => &student.document_number,
            UserRecord::Staff(staff) => &staff.dni,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(name: &str) -> UserRecord {
        UserRecord::Student(Student {
            document_number: "70000001".into(),
            student_code: "S-001".into(),
            full_name: name.into(),
            grade: "5".into(),
            section: "A".into(),
            attendance_percentage: Some(93),
            tardiness_count: 1,
        })
    }

    fn staff(name: &str) -> UserRecord {
        UserRecord::Staff(Staff {
            dni: "40000001".into(),
            name: name.into(),
            area: Some("Matemática".into()),
            role: Some("Docente".into()),
            attendance_percentage: Some(97),
        })
    }

    #[test]
    fn kind_discriminates() {
        assert_eq!(student("Ana").kind(), UserKind::Student);
        assert_eq!(staff("Iván").kind(), UserKind::Staff);
    }

    #[test]
    fn display_name_per_population() {
        assert_eq!(student("Alice Johnson").display_name(), "Alice Johnson");
        assert_eq!(staff("Albert Rivera").display_name(), "Albert Rivera");
    }

    #[test]
    fn id_uses_document_or_dni() {
        assert_eq!(student("Ana").id(), "70000001");
        assert_eq!(staff("Iván").id(), "40000001");
    }

    #[test]
    fn grade_code_concatenates() {
        let UserRecord::Student(s) = student("Ana") else {
            unreachable!()
        };
        assert_eq!(s.grade_code(), "5A");
    }
}

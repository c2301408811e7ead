#![forbid(unsafe_code)]

//! Seeded demo data.
//!
//! The dashboard runs against this fixed roster; there is no backend.
//! At least one accented name is included so accent-insensitive search
//! is demonstrable out of the box.

use aula_model::{Staff, Student, UserRecord};

fn student(
    document: &str,
    code: &str,
    name: &str,
    grade: &str,
    section: &str,
    attendance: Option<u8>,
    tardiness: u32,
) -> UserRecord {
    UserRecord::Student(Student {
        document_number: document.to_string(),
        student_code: code.to_string(),
        full_name: name.to_string(),
        grade: grade.to_string(),
        section: section.to_string(),
        attendance_percentage: attendance,
        tardiness_count: tardiness,
    })
}

fn staff(
    dni: &str,
    name: &str,
    area: Option<&str>,
    role: Option<&str>,
    attendance: Option<u8>,
) -> UserRecord {
    UserRecord::Staff(Staff {
        dni: dni.to_string(),
        name: name.to_string(),
        area: area.map(str::to_string),
        role: role.map(str::to_string),
        attendance_percentage: attendance,
    })
}

/// The full demo roster: students first, staff after, mirroring how
/// the directory lists them.
#[must_use]
pub fn demo_roster() -> Vec<UserRecord> {
    vec![
        student("70841265", "EST-0001", "María Torres Quispe", "5", "A", Some(96), 1),
        student("70512849", "EST-0002", "Alícia Márquez Rojas", "5", "A", Some(91), 3),
        student("70293561", "EST-0003", "Diego Castillo Vega", "5", "A", Some(88), 4),
        student("70654123", "EST-0004", "Lucía Fernández Paz", "5", "B", Some(94), 0),
        student("70187432", "EST-0005", "José Pérez Huamán", "5", "B", Some(83), 6),
        student("70968214", "EST-0006", "Valeria Núñez Soto", "6", "A", Some(97), 0),
        student("70345786", "EST-0007", "Mateo Flores Díaz", "6", "A", Some(90), 2),
        student("70731598", "EST-0008", "Camila Rojas Limas", "6", "B", Some(85), 5),
        student("70426913", "EST-0009", "Sebastián Cruz Ore", "6", "B", None, 2),
        student("70582347", "EST-0010", "Ana Paula Gutiérrez", "6", "B", Some(92), 1),
        staff("40217653", "Albert Rivera Campos", Some("Matemática"), Some("Docente"), Some(98)),
        staff("40873214", "Rosa Delgado Mamani", Some("Comunicación"), Some("Docente"), Some(95)),
        staff("40539871", "Iván Paredes Luna", None, Some("Auxiliar"), Some(93)),
        staff("40164298", "Carmen Silva Torres", None, None, Some(97)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use aula_model::UserKind;

    #[test]
    fn roster_mixes_both_populations() {
        let roster = demo_roster();
        assert!(roster.iter().any(|u| u.kind() == UserKind::Student));
        assert!(roster.iter().any(|u| u.kind() == UserKind::Staff));
    }

    #[test]
    fn roster_includes_an_accented_name() {
        let roster = demo_roster();
        assert!(roster.iter().any(|u| u.display_name().contains('í')));
    }

    #[test]
    fn document_numbers_are_unique() {
        let roster = demo_roster();
        let mut ids: Vec<&str> = roster.iter().map(UserRecord::id).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }
}

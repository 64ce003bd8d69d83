use client_core::{Notice, NoticeKind, WorkflowView};
use shared::{
    domain::{Attendance, GuestRecord},
    protocol::GuestEntry,
};

pub const NO_RESULTS: &str = "No hay resultados para mostrar. Favor de refrescar la pagina";

pub fn render_suggestions(suggestions: &[GuestRecord]) -> String {
    if suggestions.is_empty() {
        return "  (sin coincidencias)".to_string();
    }
    suggestions
        .iter()
        .enumerate()
        .map(|(index, guest)| format!("  {}. {}", index + 1, guest.display_name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn enabled(flag: bool, label: &str) -> String {
    if flag {
        format!("[{label}]")
    } else {
        format!(" {label} ")
    }
}

pub fn render_view(view: &WorkflowView) -> String {
    let attendance = match view.attendance {
        Some(Attendance::Yes) => "Asistire",
        Some(Attendance::No) => "No asistire",
        None => "-",
    };
    let party_size = view
        .party_size
        .map(|size| size.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut lines = vec![
        format!("Nombre: {}", view.name_field),
        format!("Asistencia: {attendance}"),
        format!(
            "Numero de asistentes: {} {party_size} {}",
            enabled(view.decrement_enabled, "-"),
            enabled(view.increment_enabled, "+")
        ),
        format!("Enviar: {}", if view.submit_enabled { "disponible" } else { "enviando..." }),
    ];
    if view.suggestions_visible {
        lines.push("Sugerencias:".to_string());
        lines.push(render_suggestions(&view.suggestions));
    }
    lines.join("\n")
}

pub fn render_notice(notice: &Notice) -> String {
    let tag = match notice.kind {
        NoticeKind::Validation => "aviso",
        NoticeKind::Confirmation => "listo",
        NoticeKind::Failure => "error",
    };
    format!("[{tag}] {}", notice.message)
}

/// Column-aligned table of guest rows. Columns come from the first row.
pub fn render_guest_table(rows: &[&GuestEntry]) -> String {
    let Some(first) = rows.first() else {
        return NO_RESULTS.to_string();
    };
    let columns = first.column_names();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| row.column(column).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let format_row = |values: &[String]| {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{value:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![format_row(&columns)];
    out.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.extend(cells.iter().map(|row| format_row(row)));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;
    use shared::domain::GuestId;

    use super::*;

    #[test]
    fn table_aligns_columns_and_fills_missing_cells() {
        let ana = GuestEntry {
            invitado_id: GuestId(2),
            nombre_invitado: "Ana Lopez".to_string(),
            numero_de_invitados_max: 2,
            extra: BTreeMap::from([("asistencia".to_string(), json!("SI"))]),
        };
        let bo = GuestEntry {
            invitado_id: GuestId(10),
            nombre_invitado: "Bo".to_string(),
            numero_de_invitados_max: 1,
            extra: BTreeMap::new(),
        };

        let table = render_guest_table(&[&ana, &bo]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(
            lines[0],
            "invitado_id | nombre_invitado | numero_de_invitados_max | asistencia"
        );
        assert_eq!(
            lines[2],
            "2           | Ana Lopez       | 2                       | SI"
        );
        assert_eq!(lines[3], "10          | Bo              | 1                       |");
    }

    #[test]
    fn empty_table_reports_no_results() {
        assert_eq!(render_guest_table(&[]), NO_RESULTS);
    }

    #[test]
    fn view_marks_enabled_stepper_buttons() {
        let view = WorkflowView {
            name_field: "Juan Perez".to_string(),
            suggestions: Vec::new(),
            suggestions_visible: false,
            selected: None,
            attendance: Some(Attendance::Yes),
            party_size: Some(3),
            attendance_enabled: true,
            increment_enabled: false,
            decrement_enabled: true,
            submit_enabled: true,
        };

        let rendered = render_view(&view);
        assert!(rendered.contains("Numero de asistentes: [-] 3  +"));
        assert!(!rendered.contains("Sugerencias"));
    }
}

//! Integration tests for the planner over the sample dataset

use malla_planner::core::error::MallaError;
use malla_planner::core::models::MallasDataset;
use malla_planner::core::planner::{
    build_malla, catalog, progress, requisite_sets, SemesterBoard,
};
use malla_planner::core::report::{BoardContext, ReportFormat};

const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/samples/mallas.json");

fn dataset() -> MallasDataset {
    MallasDataset::load(SAMPLE).expect("sample dataset loads")
}

#[test]
fn sample_loads_and_skips_bad_keys() {
    let ds = dataset();
    assert_eq!(ds.majors().len(), 3);
    assert_eq!(ds.minors().len(), 3);
    // "sin-clave-valida" is not a JSON key and is dropped
    assert_eq!(ds.plan_count(), 5);
}

#[test]
fn catalog_lists_everything_in_order() {
    let listing = catalog(&dataset());
    let names: Vec<_> = listing.majors.iter().map(|m| m.nombre.as_str()).collect();
    assert_eq!(
        names,
        ["Ingeniería de Software", "Ingeniería Civil", "Plan Común"]
    );
    // numeric versions are read as strings
    assert_eq!(listing.majors[1].version.as_deref(), Some("2"));
    assert_eq!(listing.minors[0].tipo.as_deref(), Some("Amplitud"));
}

#[test]
fn major_only_plan() {
    let malla = build_malla(&dataset(), Some("Ingeniería de Software"), None).unwrap();
    assert_eq!(malla.nombre, "Ingeniería de Software");
    assert_eq!(malla.ramos.len(), 8);
    // courses without a sigla follow the rest
    assert_eq!(malla.ramos.last().unwrap().nombre, "Optativo de Fundamentos");
}

#[test]
fn major_with_minor_dedupes_shared_course() {
    let malla = build_malla(
        &dataset(),
        Some("Ingeniería de Software"),
        Some("Computación"),
    )
    .unwrap();
    assert_eq!(malla.nombre, "Ingeniería de Software con minor Computación");
    assert_eq!(malla.ramos.len(), 10);

    let shared: Vec<_> = malla
        .ramos
        .iter()
        .filter(|r| r.sigla() == Some("IIC2233"))
        .collect();
    assert_eq!(shared.len(), 1);
    // last record wins, first position kept
    assert_eq!(shared[0].semester(), Some(4));
    assert_eq!(malla.ramos[4].sigla(), Some("IIC2233"));
}

#[test]
fn minor_without_plan_adds_nothing() {
    let malla = build_malla(&dataset(), Some("Ingeniería Civil"), Some("Minor Sin Malla")).unwrap();
    assert_eq!(malla.nombre, "Ingeniería Civil con minor Minor Sin Malla");
    assert_eq!(malla.ramos.len(), 2);
}

#[test]
fn unknown_and_missing_major() {
    let ds = dataset();
    assert!(matches!(
        build_malla(&ds, Some("Astronomía"), None),
        Err(MallaError::UnknownMajor(name)) if name == "Astronomía"
    ));
    assert!(matches!(
        build_malla(&ds, None, None),
        Err(MallaError::MissingParameter("major"))
    ));
}

#[test]
fn passthrough_fields_survive_serialization() {
    let malla = build_malla(&dataset(), Some("Ingeniería de Software"), None).unwrap();
    let value = serde_json::to_value(&malla).unwrap();
    assert_eq!(value["Nombre"], "Ingeniería de Software");
    assert_eq!(value["Ramos"][0]["Tipo"], "Mínimo");
    assert_eq!(value["Ramos"][0]["CodSigla"], "MAT1610");
}

#[test]
fn semester_board_over_sample() {
    let malla = build_malla(&dataset(), Some("Ingeniería de Software"), None).unwrap();
    let mut board = SemesterBoard::from_ramos(malla.ramos);

    let columns = board.columns();
    let semesters: Vec<_> = columns.iter().map(|c| c.semestre).collect();
    assert_eq!(semesters, [1, 2, 3]);
    // semester 2 ordered by OrdenSemestre
    let second: Vec<_> = columns[1].ramos.iter().map(|r| r.id().unwrap()).collect();
    assert_eq!(second, ["MAT1620", "FIS1514", "IIC2233"]);
    assert!((columns[0].creditos - 20.0).abs() < f64::EPSILON);
    assert_eq!(board.unscheduled().len(), 1);
    assert!((board.total_credits() - 70.0).abs() < f64::EPSILON);

    assert!(board.move_course("L-FUND", 4));
    assert!(board.move_course("ING2000", 4));
    assert!(board.unscheduled().is_empty());
    assert_eq!(board.columns().last().unwrap().ramos.len(), 2);
}

#[test]
fn requisites_over_sample() {
    let malla = build_malla(
        &dataset(),
        Some("Ingeniería de Software"),
        Some("Computación"),
    )
    .unwrap();

    let sets = requisite_sets(&malla.ramos, "IIC2233");
    assert!(sets.prerequisitos.contains("IIC1103"));
    let unlocks: Vec<_> = sets.desbloquea.iter().map(String::as_str).collect();
    // IIC2343 lists it as a corequisite, which also counts
    assert_eq!(unlocks, ["IIC2143", "IIC2343", "IIC2413"]);

    let sets = requisite_sets(&malla.ramos, "IIC2143");
    assert!(sets.corequisitos.contains("MAT1620"));
    // ING2000's "Restriccion" edge is not an unlock
    assert!(sets.desbloquea.is_empty());
}

#[test]
fn progress_over_sample() {
    let malla = build_malla(&dataset(), Some("Ingeniería de Software"), None).unwrap();
    let done = vec!["MAT1610".to_string(), "IIC1103".to_string()];
    let p = progress(&malla.ramos, &done);

    assert_eq!(p.aprobados, ["MAT1610", "IIC1103"]);
    assert!((p.creditos_aprobados - 20.0).abs() < f64::EPSILON);
    assert!(p.disponibles.contains(&"MAT1620".to_string()));
    assert!(p.disponibles.contains(&"IIC2233".to_string()));
    assert!(!p.disponibles.contains(&"IIC2143".to_string()));
    assert_eq!(p.pendientes, 6);
}

#[test]
fn markdown_board_written_to_file() {
    let malla = build_malla(&dataset(), Some("Ingeniería de Software"), None).unwrap();
    let board = SemesterBoard::from_ramos(malla.ramos);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.md");

    ReportFormat::Markdown
        .reporter()
        .generate(
            &BoardContext {
                title: &malla.nombre,
                board: &board,
            },
            &path,
        )
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# Ingeniería de Software"));
    assert!(content.contains("## Semestre 1"));
    assert!(content.contains("MAT1610"));
    assert!(content.contains("## Sin semestre"));
}

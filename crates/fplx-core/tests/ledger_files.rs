// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use fplx_core::ledger::company_routes::{self, backup_path};
use fplx_core::ledger::LedgerFile;
use fplx_core::{ExportError, Route};
use std::fs;
use tempfile::tempdir;

const ROUTE_JSON: &str = r#"{
    "legs": [
        {"ident": "EDDF", "pos": {"lat": 50.033, "lon": 8.570, "alt_ft": 364.0}, "waypoint_type": "airport"},
        {"ident": "ANEKI", "pos": {"lat": 50.600, "lon": 9.200}},
        {"ident": "DIK", "pos": {"lat": 51.500, "lon": 9.600}, "airway": {"name": "Y180", "kind": "jet"}},
        {"ident": "LBE", "pos": {"lat": 53.650, "lon": 9.600}, "airway": {"name": "Y180", "kind": "jet"}},
        {"ident": "EDDH", "pos": {"lat": 53.630, "lon": 9.988, "alt_ft": 53.0}, "waypoint_type": "airport"}
    ],
    "departure_index": 0,
    "destination_index": 4,
    "cruising_altitude_ft": 24000.0
}"#;

fn route() -> Route {
    Route::from_json(ROUTE_JSON).unwrap()
}

#[test]
fn test_corte_in_appends_unique_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corte.in");
    fs::write(&path, "RTE EDDFEDDH EDDF DCT EDDH FL100").unwrap();

    let first = LedgerFile::CorteIn.append_route(&path, &route()).unwrap();
    let second = LedgerFile::CorteIn.append_route(&path, &route()).unwrap();
    assert_eq!(first, "EDDFED01");
    assert_eq!(second, "EDDFED02");

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "RTE EDDFEDDH EDDF DCT EDDH FL100\n\
         RTE EDDFED01 EDDF DCT ANEKI Y180 LBE EDDH FL240\n\
         RTE EDDFED02 EDDF DCT ANEKI Y180 LBE EDDH FL240\n"
    );
}

#[test]
fn test_corte_in_created_when_missing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corte.in");

    let name = LedgerFile::CorteIn.append_route(&path, &route()).unwrap();
    assert_eq!(name, "EDDFEDDH");
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "RTE EDDFEDDH EDDF DCT ANEKI Y180 LBE EDDH FL240\n"
    );
}

#[test]
fn test_company_routes_append_with_backup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("companyroutes.xml");
    let original = r#"<?xml version="1.0" encoding="UTF-8"?>
<companyroutes>
<route name="EDDFEDDH">EDDF KERAX EDDH</route>
</companyroutes>
"#;
    fs::write(&path, original).unwrap();

    let name = LedgerFile::CompanyRoutes.append_route(&path, &route()).unwrap();
    assert_eq!(name, "EDDFEDDH01");
    assert_eq!(fs::read_to_string(backup_path(&path)).unwrap(), original);

    let routes = company_routes::read_routes(&path).unwrap();
    assert_eq!(
        routes,
        vec![
            ("EDDFEDDH".to_string(), "EDDF KERAX EDDH".to_string()),
            ("EDDFEDDH01".to_string(), "EDDF ANEKI Y180 LBE EDDH".to_string()),
        ]
    );

    // The backup always holds the state before the latest append
    let before_second = fs::read_to_string(&path).unwrap();
    let name = LedgerFile::CompanyRoutes.append_route(&path, &route()).unwrap();
    assert_eq!(name, "EDDFEDDH02");
    assert_eq!(fs::read_to_string(backup_path(&path)).unwrap(), before_second);
    assert_eq!(company_routes::read_routes(&path).unwrap().len(), 3);
}

#[test]
fn test_company_routes_new_file_has_no_backup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("companyroutes.xml");

    let name = LedgerFile::CompanyRoutes.append_route(&path, &route()).unwrap();
    assert_eq!(name, "EDDFEDDH");
    assert!(!backup_path(&path).exists());
    assert_eq!(company_routes::read_routes(&path).unwrap().len(), 1);
}

#[test]
fn test_company_routes_parse_error_leaves_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("companyroutes.xml");
    let broken = "<companyroutes><route name=\"A\">EDDF EDDH</rout></companyroutes>";
    fs::write(&path, broken).unwrap();

    let result = LedgerFile::CompanyRoutes.append_route(&path, &route());
    assert!(matches!(result, Err(ExportError::Parse { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), broken);
    assert!(!backup_path(&path).exists());
}

#[test]
fn test_company_routes_truncated_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("companyroutes.xml");
    let truncated = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                     <companyroutes>\n\
                     <route name=\"KDSMKOKC\">KDSM DSM J25 TUL KOKC </route>\n\
                     <route name=\"EDDSEDDH\">EDDS KRH";
    fs::write(&path, truncated).unwrap();

    let result = LedgerFile::CompanyRoutes.append_route(&path, &route());
    assert!(matches!(result, Err(ExportError::Parse { .. })));
    assert_eq!(fs::read(&path).unwrap(), truncated.as_bytes());
    assert!(!backup_path(&path).exists());
}

#[test]
fn test_company_routes_no_free_name_keeps_backup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("companyroutes.xml");
    let names = std::iter::once("EDDFEDDH".to_string())
        .chain((1..99).map(|i| format!("EDDFEDDH{:02}", i)));
    let routes: Vec<_> = names.map(|n| (n, "EDDF EDDH".to_string())).collect();
    let full = company_routes::encode_routes(&routes).unwrap();
    fs::write(&path, &full).unwrap();
    fs::write(backup_path(&path), "previous").unwrap();

    let result = LedgerFile::CompanyRoutes.append_route(&path, &route());
    assert!(matches!(result, Err(ExportError::NameExhausted(_))));
    assert_eq!(fs::read_to_string(backup_path(&path)).unwrap(), "previous");
    assert_eq!(fs::read(&path).unwrap(), full);
}

#[test]
fn test_corte_in_read_failure_leaves_path() {
    let dir = tempdir().unwrap();
    // A directory cannot be read as a file
    let path = dir.path().join("corte.in");
    fs::create_dir(&path).unwrap();
    fs::write(path.join("keep"), "RTE EDDFEDDH EDDF DCT EDDH FL100\n").unwrap();

    let result = LedgerFile::CorteIn.append_route(&path, &route());
    assert!(matches!(result, Err(ExportError::Io { .. })));
    assert!(path.is_dir());
    let entries: Vec<_> = fs::read_dir(&path).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        fs::read(path.join("keep")).unwrap(),
        b"RTE EDDFEDDH EDDF DCT EDDH FL100\n"
    );
}

#[test]
fn test_corte_in_invalid_utf8_is_appended() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corte.in");
    let original: &[u8] = b"RTE EDDFEDDH EDDF \xf4 EDDH FL100\n";
    fs::write(&path, original).unwrap();

    let name = LedgerFile::CorteIn.append_route(&path, &route()).unwrap();
    assert_eq!(name, "EDDFED01");

    let content = fs::read(&path).unwrap();
    assert!(content.starts_with(original));
    assert!(content.ends_with(b"RTE EDDFED01 EDDF DCT ANEKI Y180 LBE EDDH FL240\n"));
}

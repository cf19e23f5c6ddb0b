use super::*;
use crate::search::build_output;
use vetscan_scraper::{FeedStatus, SearchReport};

#[test]
fn parses_search_command() {
    let cli = Cli::try_parse_from(["vetscan-cli", "search", "Cairo"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Search {
            ref location,
            pretty: false,
            report: false
        }) if location == "Cairo"
    ));
}

#[test]
fn parses_search_flags() {
    let cli = Cli::try_parse_from(["vetscan-cli", "search", "Nasr City", "--pretty", "--report"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Search {
            pretty: true,
            report: true,
            ..
        })
    ));
}

#[test]
fn search_requires_location() {
    assert!(Cli::try_parse_from(["vetscan-cli", "search"]).is_err());
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["vetscan-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn help_is_handled_by_clap_without_config() {
    for args in [
        ["vetscan-cli", "--help"].as_slice(),
        ["vetscan-cli", "search", "--help"].as_slice(),
    ] {
        let err = Cli::try_parse_from(args).expect_err("help should short-circuit parsing");
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}

fn report_with(records: Vec<vetscan_core::ClinicRecord>) -> SearchReport {
    SearchReport {
        location: "Cairo".to_string(),
        url: None,
        feed: FeedStatus::Ready,
        scroll: None,
        nodes_seen: records.len(),
        nodes_skipped: 0,
        records,
        diagnostics: Vec::new(),
        error: None,
    }
}

#[test]
fn output_counts_clinics_and_links_session() {
    let id = uuid::Uuid::new_v4();
    let records = vec![
        vetscan_core::ClinicRecord::named("Nile Vet Clinic"),
        vetscan_core::ClinicRecord::named("Maadi Pet Care"),
    ];
    let output = build_output(id, "Cairo", report_with(records), false);

    assert_eq!(output.session.search_id, id);
    assert_eq!(output.session.location, "Cairo");
    assert_eq!(output.session.clinics_found, 2);

    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["clinics"][1]["name"], "Maadi Pet Care");
    assert_eq!(json["clinics"][0]["phone"], "not available");
    assert!(json.get("report").is_none());
}

#[test]
fn output_includes_report_on_request() {
    let output = build_output(uuid::Uuid::new_v4(), "Cairo", report_with(Vec::new()), true);
    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(output.session.clinics_found, 0);
    assert_eq!(json["report"]["feed"], "ready");
}

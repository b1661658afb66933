use super::*;

#[test]
fn parses_login_with_password_flag() {
    let cli = Cli::try_parse_from(["radius-console", "login", "ops@example.net", "--password", "pw"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Login { ref email, password: Some(ref pw) } if email == "ops@example.net" && pw == "pw"
    ));
}

#[test]
fn parses_nested_resource_command() {
    let cli = Cli::try_parse_from(["radius-console", "nas", "list", "--page", "3"]).unwrap();
    let Command::Resource(Resource::Nas(nas)) = cli.command else {
        panic!("expected nas command");
    };
    let NasSubcommand::List(page) = nas.command else {
        panic!("expected list");
    };
    assert_eq!(PageParams::from(page), PageParams { page: 3, page_size: 10 });
}

#[test]
fn api_key_create_defaults_validity() {
    let cli = Cli::try_parse_from(["radius-console", "api-key", "create", "--name", "billing"]).unwrap();
    let Command::Resource(Resource::ApiKey(cmd)) = cli.command else {
        panic!("expected api-key command");
    };
    assert!(matches!(cmd.command, ApiKeySubcommand::Create { days: 30, .. }));
}

#[test]
fn parses_reference_data_commands() {
    let cli = Cli::try_parse_from(["radius-console", "attribute", "4"]).unwrap();
    assert!(matches!(cli.command, Command::Resource(Resource::Attribute { group_id: 4 })));
    let cli = Cli::try_parse_from(["radius-console", "timezones"]).unwrap();
    assert!(matches!(cli.command, Command::Resource(Resource::Timezones)));
    let cli = Cli::try_parse_from(["radius-console", "identifier-types"]).unwrap();
    assert!(matches!(cli.command, Command::Resource(Resource::IdentifierTypes)));
}

#[test]
fn method_parsing_is_case_insensitive() {
    assert_eq!(parse_method("patch").unwrap(), Method::PATCH);
    assert!(matches!(parse_method("GET /"), Err(CliError::InvalidMethod(_))));
}

#[test]
fn password_line_strips_newline() {
    assert_eq!(read_password_line("s3cret\r\n".as_bytes()).unwrap(), "s3cret");
    assert!(matches!(read_password_line("\n".as_bytes()), Err(CliError::MissingPassword)));
}

#[test]
fn tree_lines_indent_by_level() {
    let groups = vec![
        NasGroup { id: 1, name: "Root".into(), level: Some(0), ..NasGroup::default() },
        NasGroup { id: 2, name: "Site".into(), level: Some(1), parent_id: Some(1), ..NasGroup::default() },
        NasGroup { id: 3, name: "Rack".into(), level: Some(2), parent_id: Some(2), ..NasGroup::default() },
        NasGroup { id: 4, name: "Loose".into(), level: None, ..NasGroup::default() },
    ];
    assert_eq!(
        tree_lines(&groups, |g| g.level),
        vec!["Root (#1)", "  Site (#2)", "    Rack (#3)", "Loose (#4)"]
    );
}

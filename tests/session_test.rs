// Interactive session tests: scripted stdin, captured stdout

mod common;

use forecast_command::output::WrappedWriter;
use forecast_command::session::{
    print_interrupted, ForecastSession, ANY_OTHER_ZIP_PROMPT, ENTER_TEMP_SCALE_PROMPT, ENTER_VALID_TEMP_SCALE_PROMPT,
    ENTER_VALID_ZIP_PROMPT, ENTER_ZIP_PROMPT, EXIT_MESSAGE,
};
use forecast_command::temp_scale::TempScale;
use mockito::{Matcher, Server};

use common::{service_for, zip_table, DENVER_CELSIUS, DENVER_FAHRENHEIT, FORECAST_PAGE};

async fn run_session(base_url: String, input: &'static str, scale: Option<TempScale>) -> String {
    let output = WrappedWriter::new(Vec::new(), 1000);
    let mut session = ForecastSession::new(input.as_bytes(), output, zip_table(), service_for(base_url));
    session.run(scale).await.expect("Session should not fail on I/O");
    String::from_utf8(session.into_output()).unwrap()
}

#[tokio::test]
async fn test_session_prompts_for_scale_then_prints_forecast() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/MapClick.php")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(FORECAST_PAGE)
        .create_async()
        .await;

    let printed = run_session(server.url(), "C\n80202\nq\n", None).await;

    assert!(printed.starts_with(&format!("\n{ENTER_TEMP_SCALE_PROMPT}\n")));
    assert!(printed.contains(ENTER_ZIP_PROMPT));
    for forecast in DENVER_CELSIUS {
        assert!(printed.contains(forecast), "missing forecast: {forecast}");
    }
    // Most immediate period prints last, right above the next prompt
    let tonight = printed.find("Tonight:").unwrap();
    let wednesday_night = printed.find("Wednesday Night:").unwrap();
    assert!(wednesday_night < tonight);
    assert!(tonight < printed.find(ANY_OTHER_ZIP_PROMPT).unwrap());
    assert!(printed.ends_with(&format!("\n{EXIT_MESSAGE}\n\n")));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_session_with_scale_flag_skips_scale_prompt() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/MapClick.php")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(FORECAST_PAGE)
        .expect(2)
        .create_async()
        .await;

    let printed = run_session(server.url(), "80202\n 80202 \nexit\n", Some(TempScale::Fahrenheit)).await;

    assert!(!printed.contains(ENTER_TEMP_SCALE_PROMPT));
    assert_eq!(printed.matches(DENVER_FAHRENHEIT[4]).count(), 2);
    assert_eq!(printed.matches(ANY_OTHER_ZIP_PROMPT).count(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_session_rejects_invalid_scales() {
    let printed = run_session("http://127.0.0.1:1".to_string(), "kelvin\n\nq\n", None).await;

    assert!(printed.contains("Not a valid temperature scale."));
    assert!(printed.contains("No temperature scale entered."));
    assert_eq!(printed.matches(ENTER_VALID_TEMP_SCALE_PROMPT).count(), 2);
    assert!(!printed.contains(ENTER_ZIP_PROMPT));
    assert!(printed.contains(EXIT_MESSAGE));
}

#[tokio::test]
async fn test_session_zip_code_errors() {
    let printed = run_session(
        "http://127.0.0.1:1".to_string(),
        "123\nyes\n12345\n00501\n",
        Some(TempScale::Celsius),
    )
    .await;

    assert!(printed.contains("Invalid zip code format."));
    assert!(printed.contains("Zip code not found."));
    assert!(printed.contains("No data available for 00501."));
    assert_eq!(printed.matches(ENTER_VALID_ZIP_PROMPT).count(), 2);
    // End of input ends the session like an exit word
    assert!(printed.ends_with(&format!("\n{EXIT_MESSAGE}\n\n")));
}

#[tokio::test]
async fn test_session_reports_unreachable_service() {
    let printed = run_session(
        "http://127.0.0.1:1".to_string(),
        "80202\nn\n",
        Some(TempScale::Celsius),
    )
    .await;

    assert!(printed.contains("No internet connection. Please try again."));
    assert!(printed.contains(ANY_OTHER_ZIP_PROMPT));
}

#[tokio::test]
async fn test_print_zip_code_once() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/MapClick.php")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(FORECAST_PAGE)
        .create_async()
        .await;

    let output = WrappedWriter::new(Vec::new(), 1000);
    let mut session = ForecastSession::new(
        "".as_bytes(),
        output,
        zip_table(),
        service_for(server.url()),
    );
    session
        .print_zip_code("80202", TempScale::Celsius)
        .await
        .unwrap();
    session
        .print_zip_code("99999", TempScale::Celsius)
        .await
        .unwrap();

    let printed = String::from_utf8(session.into_output()).unwrap();
    let expected: String = DENVER_CELSIUS
        .iter()
        .map(|f| format!("\n{f}\n"))
        .collect();
    assert_eq!(printed, format!("{expected}\nZip code not found.\n"));
    mock.assert_async().await;
}

#[test]
fn test_print_interrupted_closes_prompt_line() {
    let mut output = WrappedWriter::new(Vec::new(), 1000);
    print_interrupted(&mut output).unwrap();

    let printed = String::from_utf8(output.into_inner()).unwrap();
    assert_eq!(printed, format!("\n\n{EXIT_MESSAGE}\n\n"));
}

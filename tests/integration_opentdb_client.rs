// Open Trivia DB client against a local mock server.

use std::time::Duration;

use assert_matches::assert_matches;
use mockito::{Matcher, Server};

use trivik::session::Level;
use trivik::trivia::{
    fetch_round_questions, CategorySource, OpenTdbClient, QuestionKind, QuestionRequest,
    QuestionSource,
};
use trivik::FetchError;

fn client(server: &Server) -> OpenTdbClient {
    OpenTdbClient::new(&server.url(), Duration::from_secs(5)).unwrap()
}

#[test]
fn fetches_categories() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api_category.php")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"trivia_categories":[{"id":9,"name":"General Knowledge"},{"id":23,"name":"History"}]}"#,
        )
        .create();

    let categories = client(&server).categories().unwrap();
    mock.assert();

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[1].id, 23);
    assert_eq!(categories[1].name, "History");
}

#[test]
fn fetches_and_decodes_questions() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api.php")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("amount".into(), "1".into()),
            Matcher::UrlEncoded("category".into(), "23".into()),
            Matcher::UrlEncoded("difficulty".into(), "medium".into()),
            Matcher::UrlEncoded("encode".into(), "url3986".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"response_code":0,"results":[{
                "category":"History",
                "type":"multiple",
                "difficulty":"medium",
                "question":"In%20which%20year%20was%20the%20Battle%20of%20Hastings%3F",
                "correct_answer":"1066",
                "incorrect_answers":["1215","1492","1776"]
            }]}"#,
        )
        .create();

    let request = QuestionRequest {
        amount: 1,
        category_id: 23,
        difficulty: Level::Medium,
    };
    let questions = fetch_round_questions(&client(&server), &request).unwrap();
    mock.assert();

    assert_eq!(questions.len(), 1);
    let q = &questions[0];
    assert_eq!(q.question, "In which year was the Battle of Hastings?");
    assert_eq!(q.kind, QuestionKind::Multiple);
    assert_eq!(q.difficulty, Level::Medium);
    assert!(q.is_correct("1066"));
    assert_eq!(q.options().len(), 4);
}

#[test]
fn non_zero_response_code_is_an_error() {
    let mut server = Server::new();
    server
        .mock("GET", "/api.php")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"response_code":1,"results":[]}"#)
        .create();

    let request = QuestionRequest {
        amount: 10,
        category_id: 9,
        difficulty: Level::Hard,
    };
    assert_matches!(
        client(&server).questions(&request),
        Err(FetchError::Api { code: 1 })
    );
}

#[test]
fn short_result_is_an_error() {
    let mut server = Server::new();
    server
        .mock("GET", "/api.php")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"response_code":0,"results":[]}"#)
        .create();

    let request = QuestionRequest {
        amount: 2,
        category_id: 9,
        difficulty: Level::Easy,
    };
    assert_matches!(
        fetch_round_questions(&client(&server), &request),
        Err(FetchError::ShortResult {
            expected: 2,
            got: 0
        })
    );
}

#[test]
fn server_error_and_bad_json_are_errors() {
    let mut server = Server::new();
    server
        .mock("GET", "/api_category.php")
        .with_status(500)
        .create();
    assert_matches!(client(&server).categories(), Err(FetchError::Http(_)));

    let mut server = Server::new();
    server
        .mock("GET", "/api_category.php")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create();
    assert_matches!(client(&server).categories(), Err(FetchError::Decode(_)));
}

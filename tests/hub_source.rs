//! Hub source against a local stand-in for the datasets-server.
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use corpusprep::config::{Config, DatasetSpec};
use corpusprep::pipelines::{CorpusBuilder, Pipeline};
use corpusprep::sources::{DatasetSource, HubSource};
use serde_json::{json, Value};
use url::Url;

/// Answers `/splits` and `/rows` for a few canned datasets:
/// - `chat`: config `default` with `train` (150 rows) and `test` (2 rows), config `other` with `train` (1 row),
/// - `flaky`: `train` has 250 rows but the second page fails,
/// - anything else is a 404.
fn respond(route: &str, query: &HashMap<String, String>) -> (u16, Value) {
    let dataset = query.get("dataset").map(String::as_str).unwrap_or_default();
    let param = |k: &str| query.get(k).cloned().unwrap_or_default();

    let splits: Vec<(&str, &str, usize)> = match dataset {
        "chat" => vec![("default", "train", 150), ("default", "test", 2), ("other", "train", 1)],
        "flaky" => vec![("default", "train", 250)],
        _ => return (404, json!({"error": "The dataset does not exist."})),
    };

    match route {
        "/splits" => {
            let listed: Vec<Value> = splits
                .iter()
                .map(|(config, split, _)| json!({"dataset": dataset, "config": config, "split": split}))
                .collect();
            (200, json!({"splits": listed, "pending": [], "failed": []}))
        }
        "/rows" => {
            let offset: usize = param("offset").parse().unwrap();
            let length: usize = param("length").parse().unwrap();
            assert!(length <= 100);
            if dataset == "flaky" && offset > 0 {
                return (500, json!({"error": "internal"}));
            }

            let (config, split) = (param("config"), param("split"));
            let total = splits
                .iter()
                .find(|(c, s, _)| *c == config && *s == split)
                .map(|(_, _, n)| *n)
                .unwrap();

            let rows: Vec<Value> = (offset..total.min(offset + length))
                .map(|idx| {
                    let row = if split == "test" && idx == 1 {
                        json!("not an object")
                    } else {
                        json!({"id": idx, "text": format!("  {} {} row   {}  ", config, split, idx)})
                    };
                    json!({"row_idx": idx, "row": row, "truncated_cells": []})
                })
                .collect();
            (200, json!({"rows": rows, "num_rows_total": total, "partial": false}))
        }
        _ => (404, json!({"error": "unknown route"})),
    }
}

fn handle(mut stream: TcpStream) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();
    // drain headers
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
            break;
        }
    }

    let target = request_line.split_whitespace().nth(1).unwrap_or("/");
    let url = Url::parse(&format!("http://localhost{}", target)).unwrap();
    let query: HashMap<String, String> = url.query_pairs().into_owned().collect();

    let (status, body) = respond(url.path(), &query);
    let body = body.to_string();
    write!(
        stream,
        "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    )
    .unwrap();
    stream.flush().unwrap();
}

/// Start the server, returning its endpoint.
fn serve() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            handle(stream);
        }
    });
    endpoint
}

#[test_log::test]
fn pages_through_every_split_of_first_config() {
    let hub = HubSource::new(&serve(), None).unwrap();
    let spec: DatasetSpec = "chat".parse().unwrap();

    let results: Vec<_> = hub.records(&spec).unwrap().collect();
    assert_eq!(results.len(), 152);
    assert!(results[..151].iter().all(Result::is_ok));
    assert!(results[151].as_ref().unwrap_err().is_record_level());

    let first = results[0].as_ref().unwrap();
    assert_eq!(first.get("id"), Some(&json!(0)));
    let last_train = results[149].as_ref().unwrap();
    assert_eq!(last_train.get("id"), Some(&json!(149)));
}

#[test_log::test]
fn requested_config_and_split() {
    let hub = HubSource::new(&serve(), None).unwrap();
    let spec: DatasetSpec = "chat:other:train".parse().unwrap();
    assert_eq!(hub.records(&spec).unwrap().count(), 1);

    let spec: DatasetSpec = "chat:default:missing".parse().unwrap();
    assert!(hub.records(&spec).is_err());
}

#[test_log::test]
fn unknown_dataset() {
    let hub = HubSource::new(&serve(), None).unwrap();
    let spec: DatasetSpec = "nope".parse().unwrap();
    assert!(matches!(
        hub.records(&spec).map(|_| ()),
        Err(corpusprep::error::Error::DatasetNotFound(_))
    ));
}

#[test_log::test]
fn build_from_hub() {
    let endpoint = serve();
    let dst = tempfile::tempdir().unwrap();
    let config = Config {
        output: dst.path().join("corpus.txt"),
        datasets: vec![
            "chat:default:test".parse().unwrap(),
            "nope".parse().unwrap(),
            "flaky".parse().unwrap(),
            "chat:other".parse().unwrap(),
        ],
        endpoint: endpoint.clone(),
        ..Config::default()
    };

    let report = CorpusBuilder::new(config, HubSource::new(&endpoint, None).unwrap())
        .run()
        .unwrap();

    let names: Vec<&str> = report.datasets.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["chat", "nope", "flaky", "chat"]);

    // chat:default:test: one good row, one malformed
    assert_eq!(report.datasets[0].lines_written, 1);
    assert_eq!(report.datasets[0].malformed, 1);
    // nope: 404
    assert!(report.datasets[1].error.is_some());
    // flaky: first page written, then failure
    assert_eq!(report.datasets[2].lines_written, 100);
    assert!(report.datasets[2].error.is_some());
    // chat:other
    assert_eq!(report.datasets[3].lines_written, 1);

    let content = std::fs::read_to_string(dst.path().join("corpus.txt")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 102);
    assert_eq!(lines[0], "default test row 0");
    assert_eq!(lines[1], "default train row 0");
    assert_eq!(lines[100], "default train row 99");
    assert_eq!(lines[101], "other train row 0");
}

use logplex_drain::{BatchError, BatchProcessor, FrameError, FrameSplitter, GroupKey, MessageParser};

fn frame(msg: &str) -> String {
    format!("{} {}", msg.len(), msg)
}

/// Sample body as sent by a Heroku HTTPS drain
fn heroku_body() -> String {
    [
        "<158>1 2012-11-30T06:45:26+00:00 host heroku router - at=info method=GET path=\"/\" status=200\n",
        "<190>1 2012-11-30T06:45:26+00:00 host app web.3 - Started GET \"/\" for 1.2.3.4\n",
        "<45>1 2012-11-30T06:45:27+00:00 host app api - Error R14 (Memory quota exceeded)\n",
        "<190>1 2012-11-30T06:45:28+00:00 host app web.3 - Completed 200 OK in 15ms\n",
    ]
    .iter()
    .map(|line| frame(line))
    .collect()
}

#[test]
fn test_heroku_batch_groups_by_severity_source_and_app() {
    let body = heroku_body();
    let batch = BatchProcessor::new().process(body.as_bytes(), 4).unwrap();

    let titles: Vec<String> = batch.keys().map(|k| k.to_string()).collect();
    assert_eq!(
        titles,
        vec!["SEV:6 heroku router", "SEV:6 app web.3", "SEV:5 app api"]
    );

    let web = GroupKey {
        severity: 6,
        source: "app".to_string(),
        appname: "web.3".to_string(),
    };
    assert_eq!(
        batch.get(&web).unwrap(),
        &[
            "2012-11-30T06:45:26+00:00: Started GET \"/\" for 1.2.3.4\n".to_string(),
            "2012-11-30T06:45:28+00:00: Completed 200 OK in 15ms\n".to_string(),
        ]
    );
}

#[test]
fn test_frame_count_matches_record_count() {
    let body = heroku_body();
    let frames = FrameSplitter::new(body.as_bytes())
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let parser = MessageParser::new();
    let records: Vec<_> = frames
        .iter()
        .map(|f| parser.parse(f.text).unwrap())
        .collect();

    assert_eq!(frames.len(), records.len());
}

#[test]
fn test_end_to_end_example_record() {
    let line = "<134>1 2020-01-01T00:00:00Z host1 app web[12]- hello\n";
    let body = frame(line);
    let frames: Vec<_> = FrameSplitter::new(body.as_bytes()).collect();
    assert_eq!(frames.len(), 1);

    let msg = MessageParser::new()
        .parse(frames[0].as_ref().unwrap().text)
        .unwrap();
    assert_eq!(msg.priority, 134);
    assert_eq!(msg.severity, 6);
    assert_eq!(msg.facility, 16);
    assert_eq!(msg.hostname, "host1");
    assert_eq!(msg.source, "app");
    assert_eq!(msg.appname, "web");
    assert_eq!(msg.message, "hello\n");
}

#[test]
fn test_count_mismatch_after_successful_parse() {
    let body: String = [
        "<11>1 2020-01-01T00:00:00Z h app web - one",
        "<11>1 2020-01-01T00:00:01Z h app web - two",
    ]
    .iter()
    .map(|l| frame(l))
    .collect();

    assert_eq!(
        BatchProcessor::new().process(body.as_bytes(), 3).unwrap_err(),
        BatchError::CountMismatch {
            expected: 3,
            actual: 2
        }
    );
}

#[test]
fn test_truncated_batch() {
    assert!(matches!(
        BatchProcessor::new().process(b"10 short", 1).unwrap_err(),
        BatchError::Framing(FrameError::Truncated {
            declared: 10,
            remaining: 5,
            ..
        })
    ));
}

#[test]
fn test_second_frame_failure_reports_index() {
    let body = format!(
        "{}{}",
        frame("<11>1 2020-01-01T00:00:00Z h app web - ok"),
        frame("<11>1 not-a-time h app web - broken")
    );

    match BatchProcessor::new().process(body.as_bytes(), 2).unwrap_err() {
        BatchError::Parsing { index, cause } => {
            assert_eq!(index, 2);
            assert!(cause.to_string().contains("not-a-time"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

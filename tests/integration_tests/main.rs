use assert_json_diff::assert_json_eq;
use fxprof_collapsed_stacks::{
    convert, convert_with_stats, is_collapsed_stacks_format, Category, ImportProps, Profile,
};
use serde_json::json;

fn convert_default(text: &str) -> Profile {
    convert(text, &ImportProps::default()).unwrap()
}

#[test]
fn full_profile() {
    let text = "main;foo;bar 2\nmain;foo;baz_[j] 1\nmain;Foo::qux 1\n";
    assert!(is_collapsed_stacks_format(text));
    let profile = convert_default(text);

    assert_json_eq!(
        profile,
        json!({
            "meta": {
                "version": 24,
                "interval": 1.0,
                "processType": 0,
                "product": "Flamegraph",
                "pid": 0,
                "startTime": 0,
                "shutdownTime": null,
                "pausedRanges": [],
                "categories": [
                    { "name": "Other", "color": "grey", "subcategories": ["Other"] },
                    { "name": "Java", "color": "yellow", "subcategories": ["Other"] },
                    { "name": "Native", "color": "blue", "subcategories": ["Other"] },
                ],
                "markerSchema": [],
            },
            "libs": [],
            "threads": [
                {
                    "name": "MainThread",
                    "pid": 0,
                    "tid": 0,
                    "processType": "default",
                    "registerTime": 0,
                    "unregisterTime": null,
                    "frameTable": {
                        "schema": {
                            "location": 0,
                            "relevantForJS": 1,
                            "innerWindowID": 2,
                            "implementation": 3,
                            "optimizations": 4,
                            "line": 5,
                            "column": 6,
                            "category": 7,
                            "subcategory": 8,
                        },
                        "data": [
                            [0, false, 0, null, null, null, null, 2, 0],
                            [1, false, 0, null, null, null, null, 2, 0],
                            [2, false, 0, null, null, null, null, 2, 0],
                            [3, false, 0, null, null, null, null, 1, 0],
                            [4, false, 0, null, null, null, null, 0, 0],
                        ]
                    },
                    "stackTable": {
                        "schema": { "prefix": 0, "frame": 1 },
                        "data": [[null, 0], [0, 1], [1, 2], [1, 3], [0, 4]]
                    },
                    "samples": {
                        "schema": { "stack": 0, "time": 1, "responsiveness": 2 },
                        "data": [[2, 0, 0], [2, 1, 0], [3, 2, 0], [4, 3, 0]]
                    },
                    "markers": {
                        "schema": {
                            "name": 0,
                            "startTime": 1,
                            "endTime": 2,
                            "phase": 3,
                            "category": 4,
                            "data": 5,
                        },
                        "data": []
                    },
                    "stringTable": ["main", "foo", "bar", "baz", "Foo::qux"]
                }
            ],
            "processes": [],
            "pausedRanges": [],
        })
    );
}

#[test]
fn custom_props() {
    let props = ImportProps {
        product: "async-profiler".to_string(),
        thread_name: "worker".to_string(),
        interval_ms: 10.0,
        max_samples: 100,
    };
    let profile = convert("a;b 1\n", &props).unwrap();
    let value = serde_json::to_value(&profile).unwrap();
    assert_eq!(value["meta"]["product"], json!("async-profiler"));
    assert_eq!(value["meta"]["interval"], json!(10.0));
    assert_eq!(value["threads"][0]["name"], json!("worker"));
    assert_eq!(profile.thread().name(), "worker");
}

#[test]
fn detector() {
    assert!(!is_collapsed_stacks_format("{\"meta\":{}}"));
    assert!(!is_collapsed_stacks_format("{ main;foo;bar 12"));
    assert!(is_collapsed_stacks_format("main;foo;bar 12"));
    assert!(!is_collapsed_stacks_format("main;foo;bar\nmain;foo;bar 12"));
    assert!(!is_collapsed_stacks_format("no digits here"));
}

#[test]
fn stack_sharing() {
    let profile = convert_default("a;b;c 1\na;b;d 1\n");
    let thread = profile.thread();
    assert_eq!(thread.stack_table().len(), 4);

    let stacks: Vec<(Option<usize>, &str)> = thread
        .stack_table()
        .iter()
        .map(|stack| {
            (
                stack.prefix.map(|prefix| prefix.as_usize()),
                thread.frame_label(stack.frame).unwrap(),
            )
        })
        .collect();
    assert_eq!(
        stacks,
        vec![(None, "a"), (Some(0), "b"), (Some(1), "c"), (Some(1), "d")]
    );
}

#[test]
fn sample_times_are_consecutive() {
    let text = "a;b 3\n\nc 1\nbroken line\na;b;c 4\na;b 2\n";
    let profile = convert_default(text);
    let times: Vec<u64> = profile.thread().samples().iter().map(|s| s.time).collect();
    let expected: Vec<u64> = (0..10).collect();
    assert_eq!(times, expected);
}

#[test]
fn weight_expansion() {
    let profile = convert_default("x 5");
    let thread = profile.thread();
    assert_eq!(thread.samples().len(), 5);
    assert_eq!(thread.stack_table().len(), 1);
    let stack = thread.samples().iter().next().unwrap().stack;
    assert!(thread.samples().iter().all(|sample| sample.stack == stack));
    assert!(thread.samples().iter().all(|sample| sample.responsiveness == 0));
}

#[test]
fn skip_and_continue() {
    let (profile, stats) =
        convert_with_stats("main;foo 2\nmain;bar\n", &ImportProps::default()).unwrap();
    assert_eq!(stats.skipped_lines, 1);
    let thread = profile.thread();
    assert_eq!(thread.samples().len(), 2);
    let labels: Vec<&str> = thread.string_table().iter().collect();
    assert_eq!(labels, vec!["main", "foo"]);
}

#[test]
fn oversized_count_is_skipped() {
    let (profile, stats) = convert_with_stats(
        "main;foo 100000000000\nmain;bar 2\n",
        &ImportProps::default(),
    )
    .unwrap();
    assert_eq!(stats.skipped_lines, 1);
    assert_eq!(stats.samples, 2);
    let labels: Vec<&str> = profile.thread().string_table().iter().collect();
    assert_eq!(labels, vec!["main", "bar"]);
    let value = serde_json::to_value(&profile).unwrap();
    assert_eq!(value["threads"][0]["samples"]["data"], json!([[1, 0, 0], [1, 1, 0]]));
}

#[test]
fn only_malformed_lines() {
    let profile = convert_default("this is\nnot a profile\n");
    let thread = profile.thread();
    assert!(thread.samples().is_empty());
    assert!(thread.frame_table().is_empty());
    assert!(thread.stack_table().is_empty());
    assert!(thread.string_table().is_empty());
}

#[test]
fn empty_input() {
    for text in ["", "\n", "  \n\t\n\r\n"] {
        let profile = convert_default(text);
        let value = serde_json::to_value(&profile).unwrap();
        let thread = &value["threads"][0];
        assert_eq!(thread["frameTable"]["data"], json!([]));
        assert_eq!(thread["stackTable"]["data"], json!([]));
        assert_eq!(thread["samples"]["data"], json!([]));
        assert_eq!(thread["stringTable"], json!([]));
    }
}

#[test]
fn categories_and_stored_labels() {
    let profile = convert_default("start_thread;Foo::run;work_[j] 1\nwork_[j] 1\nwork 1\n");
    let thread = profile.thread();
    let frames: Vec<(&str, Category)> = thread
        .frame_table()
        .iter()
        .map(|frame| (thread.string(frame.location).unwrap(), frame.category))
        .collect();
    assert_eq!(
        frames,
        vec![
            ("start_thread", Category::Native),
            ("Foo::run", Category::Other),
            ("work", Category::Java),
            ("work", Category::Native),
        ]
    );
    // "work" is stored once and shared by the Java and the native frame.
    assert_eq!(thread.string_table().len(), 3);
}

#[test]
fn windows_line_endings() {
    let profile = convert_default("a;b 1\r\na;c 2\r\n");
    let labels: Vec<&str> = profile.thread().string_table().iter().collect();
    assert_eq!(labels, vec!["a", "b", "c"]);
    assert_eq!(profile.thread().samples().len(), 3);
}

#[test]
fn conversions_are_independent() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Profile>();

    let handles: Vec<_> = ["a;b 1\n", "c;d 2\n"]
        .into_iter()
        .map(|text| std::thread::spawn(move || convert_default(text)))
        .collect();
    for handle in handles {
        let profile = handle.join().unwrap();
        let thread = profile.thread();
        let first = thread.frame_table().iter().next().unwrap();
        assert_eq!(first.location.as_usize(), 0);
        assert_eq!(thread.string_table().len(), 2);
    }
}

//! Integration tests for the lexiclass commands.

use std::fs;
use std::path::Path;

use clap::Parser;
use lexiclass::cli::args::LexiclassArgs;
use lexiclass::cli::commands::execute_command;
use lexiclass::dataset::read_dataset_file;
use lexiclass::prelude::*;
use tempfile::TempDir;

fn write_corpus(dir: &Path) {
    let docs = [
        (1, "TRAIN", "earn", "Net profit rose and the dividend was raised."),
        (2, "TRAIN", "grain", "Wheat and corn exports rose, grain tonnes shipped."),
        (3, "TRAIN", "earn", "Quarterly net profit and dividend."),
        (4, "TRAIN", "grain", "Grain harvest of wheat in tonnes."),
        (5, "TEST", "earn", "Dividend and net profit."),
        (6, "TEST", "grain", "Wheat tonnes and grain."),
    ];

    let mut sgm = String::new();
    for (id, split, topic, body) in docs {
        sgm.push_str(&format!(
            "<REUTERS TOPICS=\"YES\" LEWISSPLIT=\"{split}\" NEWID=\"{id}\">\n\
             <TOPICS><D>{topic}</D></TOPICS>\n\
             <TEXT>\n\
             <BODY>{body}</BODY></TEXT>\n\
             </REUTERS>\n"
        ));
    }
    fs::write(dir.join("reut2-000.sgm"), sgm).unwrap();
    fs::write(dir.join("stopwords.txt"), "the\nand\nof\nin\nwas\n").unwrap();
}

fn run(args: &[&str]) -> Result<()> {
    let args = LexiclassArgs::try_parse_from(args).unwrap();
    execute_command(args)
}

#[test]
fn test_construct_fit_predict_commands() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_corpus(dir);

    let dir_str = dir.to_str().unwrap();
    let stopwords = dir.join("stopwords.txt");
    let train = dir.join("train.txt");
    let test = dir.join("test.txt");
    let model = dir.join("model.txt");

    run(&[
        "lexiclass",
        "--quiet",
        "construct",
        "--dataset-dir",
        dir_str,
        "--stopwords",
        stopwords.to_str().unwrap(),
        "--train-out",
        train.to_str().unwrap(),
        "--test-out",
        test.to_str().unwrap(),
        "--stats",
    ])
    .unwrap();

    let train_docs = read_dataset_file(&train).unwrap();
    assert_eq!(train_docs.len(), 4);
    assert_eq!(read_dataset_file(&test).unwrap().len(), 2);

    run(&[
        "lexiclass",
        "--quiet",
        "fit",
        train.to_str().unwrap(),
        model.to_str().unwrap(),
        "--num-features",
        "3",
    ])
    .unwrap();

    let clf = NaiveBayesClassifier::load(&model).unwrap();
    assert_eq!(clf.n_samples(), 4);
    assert!(clf.vocabulary_size() <= 6);

    run(&[
        "lexiclass",
        "--quiet",
        "--format",
        "json",
        "predict",
        test.to_str().unwrap(),
        model.to_str().unwrap(),
        "--smoothing",
        "0.5",
    ])
    .unwrap();
}

#[test]
fn test_config_file_supplies_paths() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_corpus(dir);

    let config = serde_json::json!({
        "dataset_dir": dir,
        "stopword_path": dir.join("stopwords.txt"),
        "train_set_path": dir.join("train.txt"),
        "test_set_path": dir.join("test.txt"),
    });
    let config_path = dir.join("lexiclass.json");
    fs::write(&config_path, config.to_string()).unwrap();

    run(&["lexiclass", "-q", "-c", config_path.to_str().unwrap(), "construct"]).unwrap();
    assert!(dir.join("train.txt").exists());
    assert!(dir.join("test.txt").exists());
}

#[test]
fn test_command_failures() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_corpus(dir);

    // No model has been fitted yet.
    let err = run(&[
        "lexiclass",
        "-q",
        "predict",
        dir.join("test.txt").to_str().unwrap(),
        dir.join("model.txt").to_str().unwrap(),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("model.txt"));

    // Missing stop word list.
    assert!(
        run(&[
            "lexiclass",
            "-q",
            "construct",
            "--dataset-dir",
            dir.to_str().unwrap(),
            "--stopwords",
            dir.join("missing.txt").to_str().unwrap(),
        ])
        .is_err()
    );

    // Invalid configuration.
    let config_path = dir.join("bad.json");
    fs::write(&config_path, r#"{ "smoothing": -1.0 }"#).unwrap();
    assert!(run(&["lexiclass", "-c", config_path.to_str().unwrap(), "construct"]).is_err());
}

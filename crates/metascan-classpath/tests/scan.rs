//! End-to-end scans over real directory trees and archives.

use camino::{Utf8Path, Utf8PathBuf};
use metascan_classpath::{
    ClasspathInput, PATH_LIST_SEPARATOR, ResourceFilter, ScanError, ScanOutcome, Scanner,
    ZipAccessor, classify, resolve_seeds,
};
use metascan_test_util::{JarBuilder, utf8_path, write_file};
use metascan_types::{EntryKind, ErrorPolicy, Flattening};
use tempfile::TempDir;

const PROBE_A: &str = "META-INF/ns/moduleA/probe.json";
const PROBE_B: &str = "META-INF/ns/moduleB/probe.json";

fn probes() -> [String; 2] {
    [PROBE_A.to_string(), PROBE_B.to_string()]
}

fn scanner(on_error: ErrorPolicy) -> Scanner {
    Scanner::new(ResourceFilter::new("META-INF/ns", &[]).expect("filter"), on_error)
}

fn join_list(paths: &[&Utf8PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(&PATH_LIST_SEPARATOR.to_string())
}

fn scan(
    class_path: &[&Utf8PathBuf],
    cwd: &Utf8Path,
    on_error: ErrorPolicy,
) -> Result<ScanOutcome, ScanError> {
    let input = ClasspathInput {
        class_path: join_list(class_path),
        module_path: String::new(),
    };
    let seeds = resolve_seeds(&input, cwd)?;
    scanner(on_error).scan(seeds)
}

fn verdict(outcome: &ScanOutcome) -> Flattening {
    classify(&outcome.classpath, &ZipAccessor, &probes())
        .expect("classify")
        .verdict
}

fn root(tmp: &TempDir) -> Utf8PathBuf {
    utf8_path(tmp.path())
}

#[test]
fn single_archive_with_both_probes_is_flattened() {
    let tmp = TempDir::new().expect("temp dir");
    let out = root(&tmp).join("out");
    let app = out.join("app.jar");
    JarBuilder::new()
        .file(PROBE_A, "{}")
        .file(PROBE_B, "{}")
        .write(&app);

    let outcome = scan(&[&app], &out, ErrorPolicy::Fail).expect("scan");
    assert_eq!(verdict(&outcome), Flattening::Flattened);

    let report = classify(&outcome.classpath, &ZipAccessor, &probes()).expect("classify");
    assert_eq!(report.probes[0].container.as_deref(), Some(app.as_str()));
    assert_eq!(
        report.probes[0].location.as_deref(),
        Some(format!("{app}!/{PROBE_A}").as_str())
    );
    assert!(report.diagnostic.is_none());
}

#[test]
fn separate_archives_are_modular() {
    let tmp = TempDir::new().expect("temp dir");
    let out = root(&tmp).join("out");
    let a = out.join("a.jar");
    let b = out.join("b.jar");
    JarBuilder::new().file(PROBE_A, "{}").write(&a);
    JarBuilder::new().file(PROBE_B, "{}").write(&b);

    let outcome = scan(&[&a, &b], &out, ErrorPolicy::Fail).expect("scan");
    assert_eq!(verdict(&outcome), Flattening::Modular);
}

#[test]
fn missing_probe_is_indeterminate() {
    let tmp = TempDir::new().expect("temp dir");
    let out = root(&tmp).join("out");
    let a = out.join("a.jar");
    JarBuilder::new().file(PROBE_A, "{}").write(&a);

    let outcome = scan(&[&a], &out, ErrorPolicy::Fail).expect("scan");
    let report = classify(&outcome.classpath, &ZipAccessor, &probes()).expect("classify");
    assert_eq!(report.verdict, Flattening::Indeterminate);
    assert!(report.probes[0].is_resolved());
    assert!(!report.probes[1].is_resolved());
    assert!(report.diagnostic.expect("diagnostic").contains(PROBE_B));
}

#[test]
fn first_entry_in_classpath_order_wins() {
    let tmp = TempDir::new().expect("temp dir");
    let out = root(&tmp).join("out");
    let classes = out.join("classes");
    write_file(classes.join(PROBE_A), "{}");
    let app = out.join("app.jar");
    JarBuilder::new()
        .file(PROBE_A, "{}")
        .file(PROBE_B, "{}")
        .write(&app);

    // Directory first: probe A resolves there, probe B only in the archive.
    let outcome = scan(&[&classes, &app], &out, ErrorPolicy::Fail).expect("scan");
    assert_eq!(verdict(&outcome), Flattening::Modular);

    let outcome = scan(&[&app, &classes], &out, ErrorPolicy::Fail).expect("scan");
    assert_eq!(verdict(&outcome), Flattening::Flattened);
}

#[test]
fn manifest_references_are_followed_relative_to_the_archive() {
    let tmp = TempDir::new().expect("temp dir");
    let proj = root(&tmp).join("proj");
    let module_a = proj.join("app/moduleA.jar");
    let extra = proj.join("libs/extra.jar");
    JarBuilder::new()
        .class_path("../libs/extra.jar")
        .file("META-INF/ns/moduleA/probe.json", "{}")
        .write(&module_a);
    JarBuilder::new()
        .file("META-INF/ns/extra/data.json", "{}")
        .write(&extra);

    // The working directory is unrelated to either archive.
    let elsewhere = root(&tmp).join("elsewhere");
    let outcome = scan(&[&module_a], &elsewhere, ErrorPolicy::Fail).expect("scan");

    let paths: Vec<&str> = outcome
        .classpath
        .entries()
        .iter()
        .map(|e| e.path.as_str())
        .collect();
    assert_eq!(paths, vec![module_a.as_str(), extra.as_str()]);
    assert!(outcome.resources.contains("/META-INF/ns/extra/data.json"));
    assert!(outcome.resources.contains("/META-INF/ns/moduleA/probe.json"));
}

#[test]
fn cyclic_references_terminate_and_visit_each_archive_once() {
    let tmp = TempDir::new().expect("temp dir");
    let out = root(&tmp).join("out");
    let a = out.join("a.jar");
    let b = out.join("b.jar");
    JarBuilder::new()
        .class_path("b.jar a.jar ./a.jar")
        .file("META-INF/ns/a.json", "{}")
        .write(&a);
    JarBuilder::new()
        .class_path("a.jar")
        .file("META-INF/ns/b.json", "{}")
        .write(&b);

    let outcome = scan(&[&a], &out, ErrorPolicy::Fail).expect("scan");
    let paths: Vec<&str> = outcome
        .classpath
        .entries()
        .iter()
        .map(|e| e.path.as_str())
        .collect();
    assert_eq!(paths, vec![a.as_str(), b.as_str()]);
    assert_eq!(
        outcome.resources.iter().collect::<Vec<_>>(),
        vec!["/META-INF/ns/a.json", "/META-INF/ns/b.json"]
    );
}

#[test]
fn references_are_searched_before_the_next_element() {
    let tmp = TempDir::new().expect("temp dir");
    let out = root(&tmp).join("out");
    let app = out.join("app.jar");
    let dep = out.join("lib/dep.jar");
    let last = out.join("last.jar");
    JarBuilder::new().class_path("lib/dep.jar").write(&app);
    JarBuilder::new().file("x", "x").write(&dep);
    JarBuilder::new().file("y", "y").write(&last);

    let outcome = scan(&[&app, &last], &out, ErrorPolicy::Fail).expect("scan");
    let paths: Vec<&str> = outcome
        .classpath
        .entries()
        .iter()
        .map(|e| e.path.as_str())
        .collect();
    assert_eq!(paths, vec![app.as_str(), dep.as_str(), last.as_str()]);
}

#[test]
fn reference_to_a_later_element_moves_it_forward() {
    let tmp = TempDir::new().expect("temp dir");
    let out = root(&tmp).join("out");
    let a = out.join("a.jar");
    let b = out.join("b.jar");
    let c = out.join("c.jar");
    JarBuilder::new().class_path("b.jar").write(&a);
    JarBuilder::new()
        .file(PROBE_A, "{}")
        .file(PROBE_B, "{}")
        .write(&b);
    JarBuilder::new().file(PROBE_A, "{}").write(&c);

    let outcome = scan(&[&a, &c, &b], &out, ErrorPolicy::Fail).expect("scan");
    let paths: Vec<&str> = outcome
        .classpath
        .entries()
        .iter()
        .map(|e| e.path.as_str())
        .collect();
    assert_eq!(paths, vec![a.as_str(), b.as_str(), c.as_str()]);
    assert_eq!(verdict(&outcome), Flattening::Flattened);
}

#[test]
fn archives_are_detected_by_content() {
    let tmp = TempDir::new().expect("temp dir");
    let out = root(&tmp).join("out");
    let payload = out.join("payload.dat");
    let fake = out.join("fake.jar");
    JarBuilder::new().file("META-INF/ns/p.json", "{}").write(&payload);
    write_file(&fake, "plain text, not a container");

    let outcome = scan(&[&payload, &fake], &out, ErrorPolicy::Fail).expect("scan");
    let entries = outcome.classpath.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path.as_str(), payload.as_str());
    assert_eq!(entries[0].kind, EntryKind::Archive);
    assert!(outcome.resources.contains("/META-INF/ns/p.json"));
}

#[test]
fn directories_and_archives_are_walked_alike() {
    let tmp = TempDir::new().expect("temp dir");
    let out = root(&tmp).join("out");
    let classes = out.join("classes");
    write_file(classes.join("META-INF/ns/deep/file.json"), "{}");
    write_file(classes.join("other/META-INF/ns/skip.json"), "{}");
    let jar = out.join("lib.jar");
    JarBuilder::new()
        .file("META-INF/ns/deep/file.json", "{}")
        .file("META-INF/elsewhere.json", "{}")
        .write(&jar);

    let outcome = scan(&[&classes, &jar], &out, ErrorPolicy::Fail).expect("scan");
    let resources: Vec<&str> = outcome.resources.iter().map(String::as_str).collect();
    let on_disk = classes.join("META-INF/ns/deep/file.json");
    let mut expected = vec!["/META-INF/ns/deep/file.json", on_disk.as_str()];
    expected.sort();
    assert_eq!(resources, expected);
}

#[test]
fn missing_entries_are_ignored() {
    let tmp = TempDir::new().expect("temp dir");
    let out = root(&tmp).join("out");
    let app = out.join("app.jar");
    JarBuilder::new()
        .class_path("does-not-exist.jar")
        .file(PROBE_A, "{}")
        .write(&app);
    let gone = out.join("gone");

    let outcome = scan(&[&gone, &app], &out, ErrorPolicy::Fail).expect("scan");
    assert_eq!(outcome.classpath.len(), 1);
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn corrupt_archive_aborts_by_default() {
    let tmp = TempDir::new().expect("temp dir");
    let out = root(&tmp).join("out");
    let corrupt = out.join("corrupt.jar");
    write_file(&corrupt, "PK\u{3}\u{4} truncated");
    let good = out.join("good.jar");
    JarBuilder::new().file("META-INF/ns/g.json", "{}").write(&good);

    let err = scan(&[&good, &corrupt], &out, ErrorPolicy::Fail).unwrap_err();
    assert!(matches!(err, ScanError::ArchiveOpen { .. }));
}

#[test]
fn skip_policy_records_a_diagnostic_and_continues() {
    let tmp = TempDir::new().expect("temp dir");
    let out = root(&tmp).join("out");
    let corrupt = out.join("corrupt.jar");
    write_file(&corrupt, "PK\u{3}\u{4} truncated");
    let bad_manifest = out.join("bad-manifest.jar");
    JarBuilder::new()
        .raw_manifest("Class-Path\n")
        .file("META-INF/ns/never.json", "{}")
        .write(&bad_manifest);
    let good = out.join("good.jar");
    JarBuilder::new().file("META-INF/ns/g.json", "{}").write(&good);

    let outcome = scan(&[&corrupt, &bad_manifest, &good], &out, ErrorPolicy::Skip).expect("scan");
    assert_eq!(outcome.classpath.len(), 1);
    assert_eq!(
        outcome.resources.iter().collect::<Vec<_>>(),
        vec!["/META-INF/ns/g.json"]
    );

    let skipped: Vec<&str> = outcome.diagnostics.iter().map(|d| d.entry.as_str()).collect();
    assert_eq!(skipped, vec![corrupt.as_str(), bad_manifest.as_str()]);
    assert!(outcome.diagnostics[1].message.contains("malformed manifest"));
}

#[test]
fn module_path_entries_join_the_scan() {
    let tmp = TempDir::new().expect("temp dir");
    let out = root(&tmp).join("out");
    let a = out.join("a.jar");
    let b = out.join("mods/b.jar");
    JarBuilder::new().file(PROBE_A, "{}").write(&a);
    JarBuilder::new().file(PROBE_B, "{}").write(&b);

    let input = ClasspathInput {
        class_path: "a.jar".to_string(),
        module_path: "mods/b.jar".to_string(),
    };
    let seeds = resolve_seeds(&input, &out).expect("seeds");
    let outcome = scanner(ErrorPolicy::Fail).scan(seeds).expect("scan");
    assert_eq!(outcome.classpath.len(), 2);
    assert_eq!(verdict(&outcome), Flattening::Modular);
}

#[test]
fn scanning_twice_gives_identical_results() {
    let tmp = TempDir::new().expect("temp dir");
    let out = root(&tmp).join("out");
    let a = out.join("a.jar");
    let classes = out.join("classes");
    JarBuilder::new()
        .class_path("classes/")
        .file(PROBE_A, "{}")
        .file(PROBE_B, "{}")
        .write(&a);
    write_file(classes.join("META-INF/ns/c.json"), "{}");

    let first = scan(&[&a], &out, ErrorPolicy::Fail).expect("first");
    let second = scan(&[&a], &out, ErrorPolicy::Fail).expect("second");
    assert_eq!(first.resources, second.resources);
    assert_eq!(first.classpath, second.classpath);
    assert_eq!(verdict(&first), verdict(&second));
    assert_eq!(first.classpath.len(), 2);
}

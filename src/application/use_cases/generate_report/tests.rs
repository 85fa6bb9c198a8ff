use super::*;
use crate::release_report::domain::{Coordinates, Dependency, ModuleKey};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

// Mock implementations for testing
struct MockWorkspaceReader {
    modules: Vec<Module>,
}

impl WorkspaceReader for MockWorkspaceReader {
    fn read_workspace(&self, _path: &Path) -> Result<Vec<Module>> {
        Ok(self.modules.clone())
    }
}

struct FailingWorkspaceReader;

impl WorkspaceReader for FailingWorkspaceReader {
    fn read_workspace(&self, path: &Path) -> Result<Vec<Module>> {
        Err(ReleaseHelperError::DescriptorNotFound {
            path: path.join("pom.xml"),
            suggestion: "test".to_string(),
        }
        .into())
    }
}

#[derive(Default)]
struct MockModuleResolver {
    modules: HashMap<String, Module>,
    dependencies: HashMap<String, Vec<Dependency>>,
}

impl MockModuleResolver {
    fn add(&mut self, module: Module, dependencies: Vec<Coordinates>) {
        let key = module.key().to_string();
        self.dependencies
            .insert(key.clone(), dependencies.into_iter().map(Dependency::new).collect());
        self.modules.insert(key, module);
    }
}

impl ModuleResolver for MockModuleResolver {
    fn resolve_parent(&self, module: &Module) -> Result<Option<Module>> {
        Ok(module
            .parent()
            .and_then(|p| self.modules.get(p.key().as_str()).cloned()))
    }

    fn resolved_dependencies(&self, module: &Module) -> Result<Vec<Dependency>> {
        Ok(self
            .dependencies
            .get(module.key().as_str())
            .cloned()
            .unwrap_or_default())
    }

    fn resolve_dependency(&self, dependency: &Dependency) -> Result<Module> {
        self.modules
            .get(dependency.key().as_str())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("{} not found", dependency.coordinates()))
    }
}

#[derive(Default)]
struct RecordingProgressReporter {
    messages: RefCell<Vec<String>>,
    progress: RefCell<Vec<(usize, usize)>>,
}

impl ProgressReporter for RecordingProgressReporter {
    fn report(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
    fn report_progress(&self, current: usize, total: usize, _message: Option<&str>) {
        self.progress.borrow_mut().push((current, total));
    }
    fn report_error(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
    fn report_completion(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

fn coords(gav: &str) -> Coordinates {
    let parts: Vec<&str> = gav.split(':').collect();
    Coordinates::new(parts[0], parts[1], parts[2]).unwrap()
}

fn acme() -> (MockWorkspaceReader, MockModuleResolver) {
    let parent = Module::new(coords("com.acme:parent-pom:1.0.0-SNAPSHOT"));
    let app = Module::new(coords("com.acme:app:1.0.0-SNAPSHOT"))
        .with_parent(coords("com.acme:parent-pom:1.0.0-SNAPSHOT"))
        .with_property("lib.version", "2.3.1-SNAPSHOT")
        .with_property("util.version", "4.0.0");
    let lib = Module::new(coords("com.acme:lib:2.3.1-SNAPSHOT"));

    let mut resolver = MockModuleResolver::default();
    resolver.add(parent.clone(), vec![]);
    resolver.add(
        app.clone(),
        vec![coords("com.acme:lib:2.3.1-SNAPSHOT"), coords("com.acme:util:4.0.0")],
    );
    resolver.add(lib, vec![coords("com.acme:util:4.0.0")]);

    (
        MockWorkspaceReader {
            modules: vec![parent, app],
        },
        resolver,
    )
}

fn request(goal: ReportGoal) -> ReportRequest {
    ReportRequest::builder()
        .project_path("/test/project")
        .goal(goal)
        .build()
        .unwrap()
}

#[test]
fn test_execute_helper_goal() {
    let (workspace, resolver) = acme();
    let reporter = RecordingProgressReporter::default();
    let use_case = GenerateReportUseCase::new(workspace, resolver, reporter);

    let response = use_case.execute(request(ReportGoal::Helper)).unwrap();

    assert_eq!(response.workspace_module_count, 2);
    let ReportDocument::Release(report) = &response.document else {
        panic!("expected a release report");
    };
    let keys: Vec<&str> = report.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["com.acme:parent-pom", "com.acme:app", "com.acme:lib"]);

    let app = report.get(&ModuleKey::new("com.acme", "app")).unwrap();
    assert_eq!(app.snapshot_properties.len(), 1);
    assert_eq!(app.snapshot_dependencies.len(), 1);
    assert_eq!(response.reported_module_count(), 3);
}

#[test]
fn test_execute_reports_progress_per_root() {
    let (workspace, resolver) = acme();
    let use_case =
        GenerateReportUseCase::new(workspace, resolver, RecordingProgressReporter::default());

    use_case.execute(request(ReportGoal::Helper)).unwrap();

    let reporter = &use_case.progress_reporter;
    assert_eq!(*reporter.progress.borrow(), vec![(1, 2), (2, 2)]);
    let messages = reporter.messages.borrow();
    assert!(messages[0].contains("/test/project"));
    assert!(messages.iter().any(|m| m.contains("Detected 2 module(s)")));
    assert!(messages.last().unwrap().contains("3 module(s) reported"));
}

#[test]
fn test_execute_project_info_goal() {
    let (workspace, resolver) = acme();
    let use_case =
        GenerateReportUseCase::new(workspace, resolver, RecordingProgressReporter::default());

    let response = use_case.execute(request(ReportGoal::ProjectInfo)).unwrap();

    let ReportDocument::ProjectInfo(info) = &response.document else {
        panic!("expected a project-info report");
    };
    assert_eq!(info.projects.len(), 2);
    assert_eq!(info.projects[1].artifact_id, "app");
    // All direct dependencies, stable ones included
    assert_eq!(info.projects[1].dependencies.len(), 2);
}

#[test]
fn test_execute_is_repeatable() {
    let (workspace, resolver) = acme();
    let use_case =
        GenerateReportUseCase::new(workspace, resolver, RecordingProgressReporter::default());

    let first = use_case.execute(request(ReportGoal::Helper)).unwrap();
    let second = use_case.execute(request(ReportGoal::Helper)).unwrap();

    assert_eq!(first.document, second.document);
}

#[test]
fn test_execute_with_all_modules() {
    let (workspace, mut resolver) = acme();
    resolver.add(Module::new(coords("com.acme:util:4.0.0")), vec![]);
    let use_case =
        GenerateReportUseCase::new(workspace, resolver, RecordingProgressReporter::default());

    let request = ReportRequest::builder()
        .project_path("/test/project")
        .snapshot_modules_only(false)
        .build()
        .unwrap();
    let response = use_case.execute(request).unwrap();

    // Stable modules are visited but never listed as snapshot dependencies
    assert_eq!(response.document.module_count(), 3);
}

#[test]
fn test_execute_workspace_error_propagates() {
    let use_case = GenerateReportUseCase::new(
        FailingWorkspaceReader,
        MockModuleResolver::default(),
        RecordingProgressReporter::default(),
    );

    let err = use_case.execute(request(ReportGoal::Helper)).unwrap_err();
    assert!(err.to_string().contains("pom.xml not found"));
}

#[test]
fn test_execute_empty_workspace_is_error() {
    let use_case = GenerateReportUseCase::new(
        MockWorkspaceReader { modules: vec![] },
        MockModuleResolver::default(),
        RecordingProgressReporter::default(),
    );

    let err = use_case.execute(request(ReportGoal::Helper)).unwrap_err();
    assert!(err.to_string().contains("no modules"));
}

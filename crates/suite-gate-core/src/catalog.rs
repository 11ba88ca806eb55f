// crates/suite-gate-core/src/catalog.rs
// ============================================================================
// Module: Suite Gate Static Catalog
// Description: The built-in OpenShift suite declarations.
// Purpose: Register every named suite with its predicate, policy, and hooks.
// Dependencies: suite-logic, crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! [`openshift_suites`] declares the static suite catalog in display order.
//! Every predicate excludes disabled tests first (including `all`). Curated
//! allow-lists are supplied by the caller so they can be loaded from disk.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use suite_logic::Requirement;

use crate::core::AllowList;
use crate::core::Carveout;
use crate::core::InvariantCheck;
use crate::core::SuitePolicy;
use crate::core::SuitePredicate;
use crate::core::TagCondition;
use crate::core::tags::CONFORMANCE_PARALLEL_SUITE_PREFIX;
use crate::core::tags::CONFORMANCE_SERIAL_SUITE_PREFIX;
use crate::core::tags::CONFORMANCE_SUITE_PREFIX;
use crate::core::tags::CONFORMANCE_TAG;
use crate::core::tags::DISRUPTIVE_TAG;
use crate::core::tags::EXTERNAL_STORAGE_DRIVER_PREFIX;
use crate::core::tags::LOCAL_TAG;
use crate::core::tags::SERIAL_SELF_TAG;
use crate::core::tags::feature_tag;
use crate::core::tags::sig_tag;
use crate::core::tags::suite_tag;
use crate::interfaces::SuiteEnvironment;
use crate::runtime::InitializeProvider;
use crate::runtime::KubeFrameworkInit;
use crate::runtime::NoProvider;
use crate::runtime::PreSuiteHook;
use crate::runtime::ProviderFiltered;
use crate::runtime::RegistryError;
use crate::runtime::StorageCapabilities;
use crate::runtime::Suite;
use crate::runtime::SuiteRegistry;

// ============================================================================
// SECTION: Curated Lists
// ============================================================================

/// Externally curated allow-lists referenced by the catalog.
#[derive(Debug, Clone)]
pub struct CuratedLists {
    /// Highly reliable conformance tests (`experimental/reliability/minimal`).
    pub minimal: Arc<AllowList>,
    /// Tests certified for third-party CNI plugins.
    pub cni: Arc<AllowList>,
}

impl Default for CuratedLists {
    fn default() -> Self {
        Self {
            minimal: Arc::new(AllowList::empty("minimal")),
            cni: Arc::new(AllowList::empty("cni")),
        }
    }
}

// ============================================================================
// SECTION: Predicate Helpers
// ============================================================================

/// Requirement that the name contains `needle`.
fn has(needle: impl Into<String>) -> Requirement<TagCondition> {
    Requirement::condition(TagCondition::contains(needle))
}

/// Requirement that the name lacks `needle`.
fn lacks(needle: impl Into<String>) -> Requirement<TagCondition> {
    !has(needle)
}

/// Standard early/late health-check tests.
const fn early_or_late() -> Requirement<TagCondition> {
    Requirement::condition(TagCondition::StandardEarlyOrLate)
}

/// `needle` or a standard early/late test.
fn feature_or_early_late(needle: impl Into<String>) -> SuitePredicate {
    SuitePredicate::new(Requirement::or(vec![has(needle), early_or_late()]))
}

/// Default post-run invariants for suites that leave the cluster intact.
const STABLE: InvariantCheck = InvariantCheck::Stable;

/// Minutes as a [`Duration`].
const fn minutes(count: u64) -> Duration {
    Duration::from_secs(count * 60)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Builds the static OpenShift suite registry.
///
/// # Errors
///
/// Returns [`RegistryError`] when the declarations are inconsistent.
#[allow(clippy::too_many_lines, reason = "Single declarative table of every suite.")]
pub fn openshift_suites(
    lists: &CuratedLists,
    environment: &Arc<dyn SuiteEnvironment>,
) -> Result<SuiteRegistry, RegistryError> {
    let provider: Arc<dyn PreSuiteHook> = Arc::new(ProviderFiltered::new(Arc::clone(environment)));
    let kube_init: Arc<dyn PreSuiteHook> = Arc::new(KubeFrameworkInit::new(Arc::clone(environment)));

    let suites = vec![
        Suite::new(
            "openshift/conformance",
            "Tests that ensure an OpenShift cluster and components are working properly.",
            SuitePredicate::new(has(CONFORMANCE_SUITE_PREFIX)),
        )
        .with_policy(SuitePolicy::new().with_parallelism(30).with_invariant_check(STABLE))
        .with_pre_suite(Arc::clone(&provider)),
        Suite::new(
            "openshift/conformance/parallel",
            "Only the portion of the openshift/conformance test suite that run in parallel.",
            SuitePredicate::new(has(CONFORMANCE_PARALLEL_SUITE_PREFIX)),
        )
        .with_policy(
            SuitePolicy::new()
                .with_parallelism(30)
                .with_max_allowed_flakes(15)
                .with_invariant_check(STABLE),
        )
        .with_pre_suite(Arc::clone(&provider)),
        Suite::new(
            "openshift/conformance/serial",
            "Only the portion of the openshift/conformance test suite that run serially.",
            feature_or_early_late(CONFORMANCE_SERIAL_SUITE_PREFIX),
        )
        .with_policy(SuitePolicy::new().with_test_timeout(minutes(40)).with_invariant_check(STABLE))
        .with_pre_suite(Arc::clone(&provider)),
        Suite::new(
            "openshift/disruptive",
            "The disruptive test suite.  Disruptive tests interrupt the cluster function such as by stopping/restarting the control plane or
            changing the global cluster configuration in a way that can affect other tests.",
            SuitePredicate::new(Requirement::or(vec![
                has(feature_tag("EtcdRecovery")),
                has(feature_tag("NodeRecovery")),
                Requirement::condition(TagCondition::StandardEarly),
            ]))
            .with_carveout(Carveout::new(
                "Cluster should survive master and worker failure and recover with machine health checks",
                "excluded due to stopped instance handling until https://bugzilla.redhat.com/show_bug.cgi?id=1905709 is fixed",
            )),
        )
        .with_policy(
            SuitePolicy::new()
                // Duration of the quorum restore test exceeds 60 minutes.
                .with_test_timeout(minutes(90))
                .with_invariant_check(InvariantCheck::Permissive),
        )
        .with_pre_suite(Arc::clone(&provider)),
        Suite::new(
            "kubernetes/conformance",
            "The default Kubernetes conformance suite.",
            SuitePredicate::new(Requirement::and(vec![has(suite_tag("k8s")), has(CONFORMANCE_TAG)])),
        )
        .with_policy(SuitePolicy::new().with_parallelism(30).with_invariant_check(STABLE))
        .with_pre_suite(Arc::clone(&provider)),
        Suite::new(
            "openshift/build",
            "Tests that exercise the OpenShift build functionality.",
            feature_or_early_late(feature_tag("Builds")),
        )
        .with_policy(
            SuitePolicy::new()
                .with_parallelism(7)
                // TODO: Builds are really flaky right now, remove when we land perf updates and fix io on workers
                .with_max_allowed_flakes(3)
                // Jenkins tests can take a really long time
                .with_test_timeout(minutes(60))
                .with_invariant_check(STABLE),
        )
        .with_pre_suite(Arc::clone(&provider)),
        Suite::new(
            "openshift/templates",
            "Tests that exercise the OpenShift template functionality.",
            feature_or_early_late(feature_tag("Templates")),
        )
        .with_policy(SuitePolicy::new().with_parallelism(1).with_invariant_check(STABLE))
        .with_pre_suite(Arc::clone(&provider)),
        Suite::new(
            "openshift/image-registry",
            "Tests that exercise the OpenShift image-registry functionality.",
            SuitePredicate::new(Requirement::and(vec![
                lacks(LOCAL_TAG),
                Requirement::or(vec![has(sig_tag("imageregistry")), early_or_late()]),
            ])),
        )
        .with_policy(SuitePolicy::new().with_invariant_check(STABLE))
        .with_pre_suite(Arc::clone(&provider)),
        Suite::new(
            "openshift/image-ecosystem",
            "Tests that exercise language and tooling images shipped as part of OpenShift.",
            SuitePredicate::new(Requirement::and(vec![
                lacks(LOCAL_TAG),
                Requirement::or(vec![has(feature_tag("ImageEcosystem")), early_or_late()]),
            ])),
        )
        .with_policy(
            SuitePolicy::new()
                .with_parallelism(7)
                .with_test_timeout(minutes(20))
                .with_invariant_check(STABLE),
        )
        .with_pre_suite(Arc::clone(&provider)),
        Suite::new(
            "openshift/jenkins-e2e",
            "Tests that exercise the OpenShift / Jenkins integrations provided by the OpenShift Jenkins image/plugins and the Pipeline Build Strategy.",
            feature_or_early_late(feature_tag("Jenkins")),
        )
        .with_policy(
            SuitePolicy::new()
                .with_parallelism(4)
                .with_test_timeout(minutes(20))
                .with_invariant_check(STABLE),
        )
        .with_pre_suite(Arc::clone(&provider)),
        Suite::new(
            "openshift/jenkins-e2e-rhel-only",
            "Tests that exercise the OpenShift / Jenkins integrations provided by the OpenShift Jenkins image/plugins and the Pipeline Build Strategy.",
            feature_or_early_late(feature_tag("JenkinsRHELImagesOnly")),
        )
        .with_policy(
            SuitePolicy::new()
                .with_parallelism(4)
                .with_test_timeout(minutes(20))
                .with_invariant_check(STABLE),
        )
        .with_pre_suite(Arc::clone(&provider)),
        Suite::new(
            "openshift/scalability",
            "Tests that verify the scalability characteristics of the cluster. Currently this is focused on core performance behaviors and preventing regressions.",
            SuitePredicate::new(has(suite_tag("openshift/scalability"))),
        )
        .with_policy(SuitePolicy::new().with_parallelism(1).with_test_timeout(minutes(20)))
        .with_pre_suite(Arc::clone(&provider)),
        Suite::new(
            "openshift/conformance-excluded",
            "Run only tests that are excluded from conformance. Makes identifying omitted tests easier.",
            SuitePredicate::new(lacks(CONFORMANCE_SUITE_PREFIX)),
        )
        .with_policy(SuitePolicy::new().with_invariant_check(STABLE))
        .with_pre_suite(Arc::clone(&provider)),
        Suite::new(
            "openshift/test-cmd",
            "Run only tests for test-cmd.",
            feature_or_early_late(feature_tag("LegacyCommandTests")),
        )
        .with_policy(SuitePolicy::new().with_invariant_check(STABLE))
        .with_pre_suite(Arc::new(NoProvider::new(Arc::clone(environment)))),
        Suite::new(
            "openshift/csi",
            "Run tests for an CSI driver. Set the TEST_CSI_DRIVER_FILES environment variable to the name of file with
            CSI driver test manifest. The manifest specifies Kubernetes + CSI features to test with the driver.
            See https://github.com/kubernetes/kubernetes/blob/master/test/e2e/storage/external/README.md for required format of the file.",
            SuitePredicate::new(Requirement::and(vec![
                has(EXTERNAL_STORAGE_DRIVER_PREFIX),
                lacks(DISRUPTIVE_TAG),
            ]))
            .with_carveout(Carveout::new(
                "provisioning should provision storage with any volume data source",
                "TODO: these CSI tests are disabled since Pods created by these tests\n pull image directly: https://bugzilla.redhat.com/show_bug.cgi?id=2093339",
            )),
        )
        .with_policy(SuitePolicy::new().with_invariant_check(STABLE))
        .with_pre_suite(Arc::clone(&kube_init))
        .with_post_suite(Arc::new(StorageCapabilities::new(Arc::clone(environment)))),
        Suite::new(
            "openshift/network/stress",
            "This test suite repeatedly verifies the networking function of the cluster in parallel to find flakes.",
            SuitePredicate::new(Requirement::and(vec![
                // Serial:Self are tests that can't be run in parallel with a copy of itself
                lacks(SERIAL_SELF_TAG),
                Requirement::or(vec![
                    Requirement::and(vec![has(CONFORMANCE_SUITE_PREFIX), has(sig_tag("network"))]),
                    early_or_late(),
                ]),
            ]))
            .with_carveout(Carveout::new(
                feature_tag("NetworkPolicy"),
                "Skip NetworkPolicy tests for https://bugzilla.redhat.com/show_bug.cgi?id=1980141",
            )),
        )
        .with_policy(
            SuitePolicy::new()
                .with_parallelism(60)
                .with_repetition_count(12)
                .with_test_timeout(minutes(20))
                .with_invariant_check(STABLE),
        )
        .with_pre_suite(Arc::clone(&provider)),
        Suite::new(
            "openshift/network/third-party",
            "The conformance testing suite for certified third-party CNI plugins.",
            SuitePredicate::new(Requirement::condition(TagCondition::AllowListed(Arc::clone(
                &lists.cni,
            )))),
        )
        .with_pre_suite(Arc::clone(&provider)),
        Suite::new(
            "experimental/reliability/minimal",
            "Set of highly reliable tests.",
            SuitePredicate::new(Requirement::and(vec![
                Requirement::condition(TagCondition::AllowListed(Arc::clone(&lists.minimal))),
                has(CONFORMANCE_PARALLEL_SUITE_PREFIX),
            ])),
        )
        .with_policy(
            SuitePolicy::new()
                .with_parallelism(20)
                .with_max_allowed_flakes(15)
                .with_invariant_check(STABLE),
        )
        .with_pre_suite(Arc::clone(&kube_init)),
        Suite::new("all", "Run all tests.", SuitePredicate::new(Requirement::condition(TagCondition::Any)))
            .with_pre_suite(Arc::new(InitializeProvider::new(Arc::clone(environment)))),
        Suite::new(
            "openshift/etcd/scaling",
            "This test suite runs vertical scaling tests to exercise the safe scale-up and scale-down of etcd members.",
            SuitePredicate::new(Requirement::or(vec![
                has("[Suite:openshift/etcd/scaling"),
                has(feature_tag("EtcdVerticalScaling")),
                early_or_late(),
            ])),
        )
        .with_policy(
            SuitePolicy::new()
                // etcd's vertical scaling test can take a while for apiserver rollouts to stabilize on the same revision
                .with_test_timeout(minutes(60))
                .with_invariant_check(STABLE),
        )
        .with_pre_suite(Arc::clone(&provider)),
        Suite::new(
            "openshift/etcd/recovery",
            "This test suite runs etcd recovery tests to exercise the safe restore process of etcd members.",
            SuitePredicate::new(Requirement::or(vec![
                has("[Suite:openshift/etcd/recovery"),
                has(feature_tag("EtcdRecovery")),
                early_or_late(),
            ])),
        )
        .with_policy(
            SuitePolicy::new()
                // etcd's restore test can take a while for apiserver rollouts to stabilize
                .with_test_timeout(minutes(120))
                .with_invariant_check(InvariantCheck::Permissive),
        )
        .with_pre_suite(Arc::clone(&provider)),
        Suite::new(
            "openshift/nodes/realtime",
            "This test suite runs tests to validate realtime functionality on nodes.",
            SuitePredicate::new(has("[Suite:openshift/nodes/realtime")),
        )
        .with_policy(SuitePolicy::new().with_test_timeout(minutes(30)))
        .with_pre_suite(provider),
    ];

    SuiteRegistry::new(suites)
}

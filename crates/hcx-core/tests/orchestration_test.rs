#![allow(clippy::unwrap_used)]
// Integration tests for the composite operations, against wiremock.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{basic_auth, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use hcx_core::{
    BackoffConfig, CloudEndpoints, CoreError, Credentials, HcxConfig, NetworkRole,
    NewComputeProfile, NewL2Extension, NewSitePairing, Orchestrator, PairingContext,
    PollingConfig, SddcSelector,
};

const REMOTE: &str = "https://hcx-cloud.example.com";

// ── Helpers ─────────────────────────────────────────────────────────

/// Replays `responses` in order, repeating the last one.
struct Sequence {
    calls: AtomicUsize,
    responses: Vec<ResponseTemplate>,
}

impl Sequence {
    fn new(responses: Vec<ResponseTemplate>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            responses,
        }
    }
}

impl Respond for Sequence {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses[n.min(self.responses.len() - 1)].clone()
    }
}

fn ok(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

fn fast_polling() -> PollingConfig {
    let ms = Duration::from_millis;
    PollingConfig {
        job_interval: ms(5),
        job_max_attempts: Some(20),
        certificate_wait: ms(5),
        max_certificate_waits: Some(3),
        login_retry_delay: ms(5),
        pairing_interval: ms(5),
        pairing_attempts: 3,
        pairing_delete_interval: ms(5),
        pairing_delete_attempts: 4,
        sddc_interval: ms(5),
        sddc_backoff: BackoffConfig {
            base: ms(2),
            max: ms(10),
            max_retries: 3,
        },
        app_engine_interval: ms(5),
        app_engine_settle: ms(1),
    }
}

async fn setup() -> (MockServer, Orchestrator) {
    let server = MockServer::start().await;
    let base = Url::parse(&server.uri()).unwrap();
    let mut config = HcxConfig::new(base.clone());
    config.admin_url = Some(base);
    config.consumer = Some(Credentials::new(
        "administrator@vsphere.local",
        SecretString::from("consumer-pass".to_owned()),
    ));
    config.admin = Some(Credentials::new(
        "admin",
        SecretString::from("admin-pass".to_owned()),
    ));
    config.cloud_token = Some(SecretString::from("refresh-me".to_owned()));
    config.cloud_endpoints = Some(CloudEndpoints {
        vmc_auth: Url::parse(&format!("{}/csp/gateway/am/api", server.uri())).unwrap(),
        hcx_cloud_auth: Url::parse(&format!("{}/provider/csp", server.uri())).unwrap(),
        hcx_cloud_consumer: Url::parse(&format!("{}/provider/csp/consumer", server.uri()))
            .unwrap(),
    });
    config.polling = fast_polling();

    Mock::given(method("POST"))
        .and(path("/hybridity/api/sessions"))
        .respond_with(ResponseTemplate::new(200).insert_header("x-hm-authorization", "tok"))
        .mount(&server)
        .await;

    let orchestrator = Orchestrator::new(config).unwrap();
    (server, orchestrator)
}

async fn mount_job(server: &MockServer, job_id: &str, done: bool) {
    Mock::given(method("GET"))
        .and(path(format!("/hybridity/api/jobs/{job_id}")))
        .respond_with(ok(json!({"jobId": job_id, "isDone": done, "didFail": false})))
        .mount(server)
        .await;
}

/// Cloud list, resource containers and the pairing list behind `site_pairing`.
/// With `remote_listed` off, the remote cloud list does not know `REMOTE` yet.
async fn mount_pairing_context(server: &MockServer, remote_listed: bool) {
    Mock::given(method("GET"))
        .and(path("/hybridity/api/cloudConfigs"))
        .respond_with(ok(json!({"data": {"items": [
            {"url": "https://other.example.com", "endpointId": "ep-other"},
            {"url": REMOTE, "endpointId": "ep-remote", "cloudType": "hcx"}
        ]}})))
        .mount(server)
        .await;
    for (side, container) in [
        ("local", json!({"vcuuid": "vc-uuid-1", "resourceId": "res-local", "resourceName": "vc01"})),
        (
            "remote",
            json!({"vcuuid": "vc-uuid-2", "resourceId": "res-remote", "resourceName": "vc-cloud", "resourceType": "VC"}),
        ),
    ] {
        let filter = json!({"filter": {"cloud": {"local": side == "local", "remote": side == "remote"}}});
        Mock::given(method("POST"))
            .and(path("/hybridity/api/service/inventory/resourcecontainer/list"))
            .and(body_partial_json(filter))
            .respond_with(ok(json!({"success": true, "data": {"items": [container]}})))
            .mount(server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/hybridity/api/service/inventory/cloud/list"))
        .and(body_partial_json(json!({"filter": {"local": true}})))
        .respond_with(ok(json!({"data": {"items": [
            {"endpointId": "ep-local", "name": "onprem", "url": "https://hcx.corp.local"}
        ]}})))
        .mount(server)
        .await;
    let mut remote_clouds = vec![json!(
        {"endpointId": "ep-other", "name": "other", "url": "https://other.example.com", "endpointType": "VC"}
    )];
    if remote_listed {
        remote_clouds.push(json!({"endpointId": "ep-remote", "name": "cloud", "url": REMOTE, "endpointType": "VMC"}));
    }
    Mock::given(method("POST"))
        .and(path("/hybridity/api/service/inventory/cloud/list"))
        .and(body_partial_json(json!({"filter": {"remote": true}})))
        .respond_with(ok(json!({"data": {"items": remote_clouds}})))
        .mount(server)
        .await;
}

fn new_pairing() -> NewSitePairing {
    NewSitePairing {
        url: REMOTE.into(),
        username: "cloudadmin@vmc.local".into(),
        password: SecretString::from("remote-pass".to_owned()),
    }
}

// ── Site pairing ────────────────────────────────────────────────────

#[tokio::test]
async fn test_certificate_recovery_happens_exactly_once() {
    let (server, hcx) = setup().await;

    Mock::given(method("POST"))
        .and(path("/hybridity/api/cloudConfigs"))
        .respond_with(Sequence::new(vec![
            ok(json!({"success": false, "errors": [{
                "error": "Certificate not trusted",
                "data": [{"certificate": "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----"}]
            }]})),
            ok(json!({"success": true, "data": {"jobId": "job-1"}})),
        ]))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hybridity/api/admin/certificates"))
        .and(body_partial_json(json!({"certificate": "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----"})))
        .respond_with(ok(json!({"success": true, "completed": true})))
        .expect(1)
        .mount(&server)
        .await;
    mount_job(&server, "job-1", true).await;
    mount_pairing_context(&server, true).await;

    let pairing = hcx.create_site_pairing(&new_pairing()).await.unwrap();
    assert_eq!(
        pairing,
        PairingContext {
            url: REMOTE.into(),
            remote_endpoint_id: "ep-remote".into(),
            remote_name: "cloud".into(),
            remote_endpoint_type: "VMC".into(),
            remote_resource_id: "res-remote".into(),
            remote_resource_name: "vc-cloud".into(),
            remote_resource_type: "VC".into(),
            local_vc: "vc-uuid-1".into(),
            local_endpoint_id: "ep-local".into(),
            local_name: "onprem".into(),
        }
    );
}

#[tokio::test]
async fn test_second_certificate_error_is_fatal() {
    let (server, hcx) = setup().await;

    Mock::given(method("POST"))
        .and(path("/hybridity/api/cloudConfigs"))
        .respond_with(ok(json!({"errors": [{
            "error": "Certificate not trusted",
            "data": [{"certificate": "PEM"}]
        }]})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hybridity/api/admin/certificates"))
        .respond_with(ok(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let err = hcx.create_site_pairing(&new_pairing()).await.unwrap_err();
    assert!(matches!(err, CoreError::OperationFailed { .. }), "{err}");
}

#[tokio::test]
async fn test_login_failure_is_reported_without_retry() {
    let (server, hcx) = setup().await;

    Mock::given(method("POST"))
        .and(path("/hybridity/api/cloudConfigs"))
        .respond_with(ok(json!({"errors": [{"error": "Login failure", "text": "Invalid credentials"}]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hybridity/api/admin/certificates"))
        .respond_with(ok(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;

    let err = hcx.create_site_pairing(&new_pairing()).await.unwrap_err();
    assert!(err.is_auth_error());
    assert!(err.to_string().contains("Invalid credentials"));
}

#[tokio::test]
async fn test_stalled_pairing_job_is_resubmitted_once() {
    let (server, hcx) = setup().await;

    Mock::given(method("POST"))
        .and(path("/hybridity/api/cloudConfigs"))
        .respond_with(Sequence::new(vec![
            ok(json!({"data": {"jobId": "job-stuck"}})),
            ok(json!({"data": {"jobId": "job-2"}})),
        ]))
        .expect(2)
        .mount(&server)
        .await;
    mount_job(&server, "job-stuck", false).await;
    mount_job(&server, "job-2", true).await;
    mount_pairing_context(&server, true).await;

    let pairing = hcx.create_site_pairing(&new_pairing()).await.unwrap();
    assert_eq!(pairing.remote_endpoint_id, "ep-remote");

    let stuck_polls = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/hybridity/api/jobs/job-stuck")
        .count();
    assert_eq!(stuck_polls, 3);
}

#[tokio::test]
async fn test_delete_missing_pairing_is_a_no_op() {
    let (server, hcx) = setup().await;

    Mock::given(method("GET"))
        .and(path("/hybridity/api/cloudConfigs"))
        .respond_with(ok(json!({"data": {"items": []}})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ok(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;

    hcx.delete_site_pairing(REMOTE).await.unwrap();
}

#[tokio::test]
async fn test_fresh_pairing_without_remote_cloud_entry() {
    let (server, hcx) = setup().await;

    Mock::given(method("POST"))
        .and(path("/hybridity/api/cloudConfigs"))
        .respond_with(ok(json!({"data": {"jobId": "job-1"}})))
        .expect(1)
        .mount(&server)
        .await;
    mount_job(&server, "job-1", true).await;
    mount_pairing_context(&server, false).await;

    let pairing = hcx.create_site_pairing(&new_pairing()).await.unwrap();
    assert_eq!(pairing.remote_endpoint_id, "ep-remote");
    assert_eq!(pairing.remote_resource_id, "res-remote");
    assert!(pairing.remote_name.is_empty());
    assert!(pairing.remote_endpoint_type.is_empty());
}

#[tokio::test]
async fn test_delete_pairing_gives_up_when_it_never_leaves() {
    let (server, hcx) = setup().await;

    Mock::given(method("GET"))
        .and(path("/hybridity/api/cloudConfigs"))
        .respond_with(ok(json!({"data": {"items": [
            {"url": REMOTE, "endpointId": "ep-remote"}
        ]}})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/hybridity/api/endpointPairing/ep-remote"))
        .respond_with(ok(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let err = hcx.delete_site_pairing(REMOTE).await.unwrap_err();
    assert!(
        matches!(err, CoreError::PollLimitReached { attempts: 4, .. }),
        "{err}"
    );
}

// ── Compute profile ─────────────────────────────────────────────────

async fn mount_inventory(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/hybridity/api/service/inventory/vc/list"))
        .respond_with(ok(json!({"data": {"items": [{
            "entity_id": "vc-1",
            "name": "vc01.corp.local",
            "entityType": "VC",
            "children": [{
                "entity_id": "datacenter-3",
                "name": "DC1",
                "entityType": "Datacenter",
                "children": [
                    {"entity_id": "domain-c7", "name": "Cluster-10", "entityType": "ClusterComputeResource"},
                    {"entity_id": "domain-c8", "name": "Cluster-1", "entityType": "ClusterComputeResource"}
                ]
            }]
        }]}})))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hybridity/api/service/inventory/vc/datastores/query"))
        .and(body_partial_json(json!({"filter": {"computeIds": ["domain-c8"]}})))
        .respond_with(ok(json!({"success": true, "data": {"items": [
            {"id": "datastore-11", "name": "vsanDatastore", "entity_type": "Datastore"}
        ]}})))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hybridity/api/service/inventory/vc/dvs/query"))
        .respond_with(ok(json!({"success": true, "data": {"items": [
            {"id": "dvs-21", "name": "DSwitch", "type": "VmwareDistributedVirtualSwitch", "maxMtu": 9000}
        ]}})))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hybridity/api/networks"))
        .and(query_param("action", "queryIpUsage"))
        .respond_with(ok(json!([
            {"objectId": "np-mgmt", "name": "mgmt"},
            {"objectId": "np-uplink", "name": "uplink"}
        ])))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_compute_profile_end_to_end() {
    let (server, hcx) = setup().await;
    mount_inventory(&server).await;

    Mock::given(method("POST"))
        .and(path("/hybridity/api/interconnect/computeProfiles"))
        .respond_with(ok(json!({"data": {"interconnectTaskId": "task-1", "computeProfileId": "cp-1"}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/hybridity/api/interconnect/tasks/task-1"))
        .respond_with(Sequence::new(vec![
            ok(json!({"interconnectTaskId": "task-1", "status": "RUNNING"})),
            ok(json!({"interconnectTaskId": "task-1", "status": "SUCCESS"})),
        ]))
        .expect(2)
        .mount(&server)
        .await;

    let networks = BTreeMap::from([
        (NetworkRole::Management, "np-mgmt".to_owned()),
        (NetworkRole::Uplink, "np-uplink".to_owned()),
        (NetworkRole::Vmotion, "np-mgmt".to_owned()),
        (NetworkRole::Replication, String::new()),
    ]);
    let profile = hcx
        .create_compute_profile(&NewComputeProfile {
            name: "cp".into(),
            datacenter: None,
            cluster: "Cluster-1".into(),
            datastore: "vsanDatastore".into(),
            dvs: "DSwitch".into(),
            services: vec!["INTERCONNECT".into(), "WANOPT".into()],
            networks,
        })
        .await
        .unwrap();
    assert_eq!(profile.compute_profile_id, "cp-1");

    let requests = server.received_requests().await.unwrap();
    let submitted = requests
        .iter()
        .find(|r| r.method.as_str() == "POST" && r.url.path() == "/hybridity/api/interconnect/computeProfiles")
        .unwrap();
    let body: Value = serde_json::from_slice(&submitted.body).unwrap();

    assert_eq!(body["compute"][0]["cmpId"], "vc-1");
    assert_eq!(body["compute"][0]["id"], "datacenter-3");
    assert_eq!(body["deploymentContainer"]["compute"][0]["id"], "domain-c8");
    assert_eq!(body["deploymentContainer"]["storage"][0]["id"], "datastore-11");
    assert_eq!(body["switches"][0]["maxMtu"], 9000);
    assert_eq!(body["services"][1]["name"], "WANOPT");

    let networks = body["networks"].as_array().unwrap();
    assert_eq!(networks.len(), 2);
    assert_eq!(networks[0]["id"], "np-mgmt");
    assert_eq!(networks[0]["tags"], json!(["management", "vmotion"]));
    assert_eq!(networks[0]["status"]["state"], "REALIZED");
    assert_eq!(networks[1]["tags"], json!(["uplink"]));
}

#[tokio::test]
async fn test_missing_role_network_is_a_composition_error() {
    let (server, hcx) = setup().await;
    mount_inventory(&server).await;
    Mock::given(method("POST"))
        .and(path("/hybridity/api/interconnect/computeProfiles"))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let err = hcx
        .create_compute_profile(&NewComputeProfile {
            name: "cp".into(),
            cluster: "Cluster-1".into(),
            datastore: "vsanDatastore".into(),
            dvs: "DSwitch".into(),
            networks: BTreeMap::from([(NetworkRole::Management, "np-gone".to_owned())]),
            ..NewComputeProfile::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Composition { .. }), "{err}");
}

#[tokio::test]
async fn test_failed_task_surfaces_operation_failure() {
    let (server, hcx) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/hybridity/api/interconnect/computeProfiles/cp-1"))
        .respond_with(ok(json!({"data": {"interconnectTaskId": "task-9"}})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/hybridity/api/interconnect/tasks/task-9"))
        .respond_with(ok(json!({"interconnectTaskId": "task-9", "status": "FAILED"})))
        .expect(1)
        .mount(&server)
        .await;

    let err = hcx.delete_compute_profile("cp-1").await.unwrap_err();
    assert!(matches!(err.root_cause(), CoreError::OperationFailed { .. }), "{err}");
}

// ── L2 extension ────────────────────────────────────────────────────

#[tokio::test]
async fn test_l2_extension_uses_appliance_with_room() {
    let (server, hcx) = setup().await;

    Mock::given(method("POST"))
        .and(path("/hybridity/api/service/inventory/networks"))
        .respond_with(ok(json!({"data": {"items": [
            {"entity_id": "seg-1", "name": "VM-NET", "entityType": "NsxtSegment"},
            {"entity_id": "dvportgroup-12", "name": "VM-NET", "entityType": "DistributedVirtualPortgroup"}
        ]}})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hybridity/api/interconnect/appliances/query"))
        .respond_with(ok(json!({"items": [
            {"applianceId": "ne-full", "serviceMeshId": "mesh-1", "networkExtensionCount": 9},
            {"applianceId": "ne-other", "serviceMeshId": "mesh-2", "networkExtensionCount": 0},
            {"applianceId": "ne-free", "serviceMeshId": "mesh-1", "networkExtensionCount": 3}
        ]})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hybridity/api/l2Extensions"))
        .and(body_partial_json(json!({
            "vcGuid": "vc-uuid-1",
            "sourceAppliance": {"applianceId": "ne-free"},
            "sourceNetwork": {"networkId": "dvportgroup-12"},
            "destinationNetwork": {"gatewayId": "T1-GW"}
        })))
        .respond_with(ok(json!({"id": "job-l2"})))
        .expect(1)
        .mount(&server)
        .await;
    mount_job(&server, "job-l2", true).await;
    Mock::given(method("GET"))
        .and(path("/hybridity/api/l2Extensions"))
        .respond_with(ok(json!({"items": [
            {"stretchId": "stretch-1", "sourceNetwork": {"networkName": "VM-NET"}}
        ]})))
        .mount(&server)
        .await;

    let pairing = PairingContext {
        local_vc: "vc-uuid-1".into(),
        local_endpoint_id: "ep-local".into(),
        remote_endpoint_id: "ep-remote".into(),
        ..PairingContext::default()
    };
    let extension = hcx
        .create_l2_extension(
            &pairing,
            &NewL2Extension {
                source_network: "VM-NET".into(),
                destination_t1: "T1-GW".into(),
                gateway: "10.0.0.1".into(),
                netmask: "255.255.255.0".into(),
                service_mesh_id: Some("mesh-1".into()),
                ..NewL2Extension::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(extension.stretch_id, "stretch-1");
}

// ── VMware Cloud ────────────────────────────────────────────────────

async fn mount_cloud_auth(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/csp/gateway/am/api/auth/api-tokens/authorize"))
        .respond_with(ok(json!({"access_token": "access-1"})))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/provider/csp/api/sessions"))
        .respond_with(ResponseTemplate::new(200).insert_header("x-hm-authorization", "cloud-tok"))
        .mount(server)
        .await;
}

fn sddcs(status: &str) -> ResponseTemplate {
    ok(json!({"sddcs": [{"id": "sddc-1", "name": "prod", "deploymentStatus": status}]}))
}

#[tokio::test]
async fn test_activation_of_active_sddc_is_refused() {
    let (server, hcx) = setup().await;
    mount_cloud_auth(&server).await;
    Mock::given(method("GET"))
        .and(path("/provider/csp/consumer/api/sddcs"))
        .respond_with(sddcs("ACTIVE"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/provider/csp/consumer/api/sddcs/sddc-1"))
        .respond_with(ok(json!({"jobId": "j"})))
        .expect(0)
        .mount(&server)
        .await;

    let err = hcx
        .activate_sddc(&SddcSelector::Name("prod".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::AlreadyActive { .. }), "{err}");
}

#[tokio::test]
async fn test_activation_backs_off_over_failed_status_fetches() {
    let (server, hcx) = setup().await;
    mount_cloud_auth(&server).await;
    Mock::given(method("GET"))
        .and(path("/provider/csp/consumer/api/sddcs"))
        .respond_with(Sequence::new(vec![
            sddcs("DE-ACTIVATED"),
            ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"),
            sddcs("ACTIVATING"),
            sddcs("ACTIVE"),
        ]))
        .expect(4)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/provider/csp/consumer/api/sddcs/sddc-1"))
        .and(query_param("action", "activate"))
        .respond_with(ok(json!({"jobId": "j-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let sddc = hcx.activate_sddc(&SddcSelector::Id("sddc-1".into())).await.unwrap();
    assert_eq!(sddc.id, "sddc-1");
}

#[tokio::test]
async fn test_activation_failure_is_terminal() {
    let (server, hcx) = setup().await;
    mount_cloud_auth(&server).await;
    Mock::given(method("GET"))
        .and(path("/provider/csp/consumer/api/sddcs"))
        .respond_with(Sequence::new(vec![sddcs(""), sddcs("ACTIVATION_FAILED")]))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/provider/csp/consumer/api/sddcs/sddc-1"))
        .respond_with(ok(json!({"jobId": "j-1"})))
        .mount(&server)
        .await;

    let err = hcx
        .activate_sddc(&SddcSelector::Id("sddc-1".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::OperationFailed { .. }), "{err}");
}

#[tokio::test]
async fn test_deactivation_ends_when_status_disappears() {
    let (server, hcx) = setup().await;
    mount_cloud_auth(&server).await;
    Mock::given(method("GET"))
        .and(path("/provider/csp/consumer/api/sddcs"))
        .respond_with(Sequence::new(vec![sddcs("ACTIVE"), sddcs("ACTIVE"), sddcs("")]))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/provider/csp/consumer/api/sddcs/sddc-1"))
        .and(query_param("action", "deactivate"))
        .respond_with(ok(json!({"jobId": "j-2"})))
        .expect(1)
        .mount(&server)
        .await;

    hcx.deactivate_sddc(&SddcSelector::Name("prod".into()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_sddc_wait_observes_cancellation() {
    let (server, hcx) = setup().await;
    mount_cloud_auth(&server).await;
    Mock::given(method("GET"))
        .and(path("/provider/csp/consumer/api/sddcs"))
        .respond_with(sddcs("ACTIVATING"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/provider/csp/consumer/api/sddcs/sddc-1"))
        .respond_with(ok(json!({"jobId": "j-1"})))
        .mount(&server)
        .await;

    let token = hcx.cancellation_token();
    let cancel_soon = async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        token.cancel();
    };
    let selector = SddcSelector::Id("sddc-1".into());
    let (result, ()) = tokio::join!(
        hcx.activate_sddc(&selector),
        cancel_soon
    );
    let err = result.unwrap_err();
    assert!(matches!(err, CoreError::Cancelled { .. }), "{err}");

    // A cancel only ends the waits running at the time.
    server.reset().await;
    mount_cloud_auth(&server).await;
    Mock::given(method("GET"))
        .and(path("/provider/csp/consumer/api/sddcs"))
        .respond_with(Sequence::new(vec![sddcs("DE-ACTIVATED"), sddcs("ACTIVE")]))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/provider/csp/consumer/api/sddcs/sddc-1"))
        .respond_with(ok(json!({"jobId": "j-2"})))
        .expect(1)
        .mount(&server)
        .await;

    let sddc = hcx.activate_sddc(&SddcSelector::Id("sddc-1".into())).await.unwrap();
    assert_eq!(sddc.id, "sddc-1");
}

// ── Admin ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_activation_is_only_created_when_absent() {
    let (server, hcx) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/global/config/hcx"))
        .respond_with(ok(json!({"data": {"items": [{"config": {
            "url": "https://connect.hcx.vmware.com",
            "activationKey": "EXISTING",
            "UUID": "act-1"
        }}]}})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/global/config/hcx"))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let activation = hcx
        .activate("https://connect.hcx.vmware.com", "NEW-KEY")
        .await
        .unwrap();
    assert_eq!(activation.activation_key, "EXISTING");
}

#[tokio::test]
async fn test_sso_updates_existing_lookup_service() {
    let (server, hcx) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/global/config/lookupservice"))
        .respond_with(ok(json!({"data": {"items": [{"config": {
            "lookupServiceUrl": "https://old-psc",
            "providerType": "PSC",
            "UUID": "ls-1"
        }}]}})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/global/config/lookupservice/ls-1"))
        .and(body_partial_json(json!({"data": {"items": [{"config": {
            "lookupServiceUrl": "https://vc01.corp.local",
            "UUID": "ls-1"
        }}]}})))
        .respond_with(ok(json!({"data": {"items": [{"config": {
            "lookupServiceUrl": "https://vc01.corp.local",
            "providerType": "PSC",
            "UUID": "ls-1"
        }}]}})))
        .expect(1)
        .mount(&server)
        .await;

    let config = hcx.configure_sso("https://vc01.corp.local").await.unwrap();
    assert_eq!(config.uuid, "ls-1");
}

#[tokio::test]
async fn test_vcenter_registration_restarts_app_engine() {
    let (server, hcx) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/global/config/vcenter"))
        .and(basic_auth("admin", "admin-pass"))
        .and(body_partial_json(json!({"data": {"items": [{"config": {
            "url": "https://vc01.corp.local",
            "userName": "administrator@vsphere.local",
            "password": "Vk13YXJlMSE="
        }}]}})))
        .respond_with(ok(json!({"data": {"items": [{"config": {
            "url": "https://vc01.corp.local",
            "userName": "administrator@vsphere.local",
            "vcuuid": "vc-uuid-1",
            "UUID": "vc-reg-1"
        }}]}})))
        .expect(1)
        .mount(&server)
        .await;
    for action in ["stop", "start"] {
        Mock::given(method("POST"))
            .and(path("/components/appengine"))
            .and(query_param("action", action))
            .respond_with(ok(json!({"result": "OK"})))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/components/appengine/status"))
        .respond_with(Sequence::new(vec![
            ok(json!({"result": "RUNNING"})),
            ok(json!({"result": "STOPPED"})),
            ok(json!({"result": "STOPPED"})),
            ok(json!({"result": "RUNNING"})),
        ]))
        .expect(4)
        .mount(&server)
        .await;

    let registration = hcx
        .register_vcenter(
            "https://vc01.corp.local",
            "administrator@vsphere.local",
            &SecretString::from("VMware1!".to_owned()),
        )
        .await
        .unwrap();
    assert_eq!(registration.uuid, "vc-reg-1");
}

mod common;

use axum::http::StatusCode;
use serde_json::json;

use club_portal_api::config::Config;
use club_portal_api::models::{Role, User};
use common::*;

#[tokio::test]
async fn health_reports_service() {
    let (status, body) = send(app(), get_request("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "club-portal-api");
}

#[tokio::test]
async fn anonymous_capabilities_are_all_false() {
    let (status, body) = send(app(), get_request("/api/v1/authz/capabilities", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], serde_json::Value::Null);
    for flag in [
        "isOwner",
        "isDev",
        "isPrivileged",
        "canAccessAdminPanel",
        "canAnnounceGlobally",
        "canCreateClub",
        "canDeleteClub",
        "canPlanEvents",
    ] {
        assert_eq!(body[flag], false, "{flag}");
    }
}

#[tokio::test]
async fn dev_capabilities_exclude_admin_panel() {
    let token = token_for(&User::new("d1", Role::Dev));
    let (_, body) = send(app(), get_request("/api/v1/authz/capabilities", Some(&token))).await;
    assert_eq!(body["role"], "DEV");
    assert_eq!(body["isDev"], true);
    assert_eq!(body["isPrivileged"], true);
    assert_eq!(body["canAccessAdminPanel"], false);
}

#[tokio::test]
async fn invalid_optional_token_is_treated_as_anonymous() {
    let (status, body) = send(
        app(),
        json_request("POST", "/api/v1/authz/check", Some("not-a-jwt"), json!({ "action": "createClub" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], false);
}

#[tokio::test]
async fn anonymous_is_denied_every_action() {
    let target = json!({ "id": "u1", "role": "MEMBER" });
    let club = json!({ "id": "c1", "name": "Chess", "memberIds": ["u1"] });
    let checks = [
        json!({ "action": "accessAdminPanel" }),
        json!({ "action": "announceGlobally" }),
        json!({ "action": "createClub" }),
        json!({ "action": "deleteClub" }),
        json!({ "action": "planEvents" }),
        json!({ "action": "manageClub", "clubId": "c1" }),
        json!({ "action": "manageUser", "target": target }),
        json!({ "action": "viewSensitiveData", "target": target }),
        json!({ "action": "grantBadge", "badgeType": "CUSTOM" }),
        json!({ "action": "kickFromClub", "target": target, "clubId": "c1" }),
        json!({ "action": "accessRestrictedClub", "club": club }),
        json!({ "action": "openClubChat", "club": club }),
    ];
    for check in checks {
        let (status, body) = send(app(), json_request("POST", "/api/v1/authz/check", None, check.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["allowed"], false, "{check}");
    }
}

#[tokio::test]
async fn leader_manages_only_own_club() {
    let token = token_for(&User::new("l1", Role::ClubLeader).leading("c1"));
    let ask = |club: &str| json_request("POST", "/api/v1/authz/check", Some(&token), json!({ "action": "manageClub", "clubId": club }));

    let (_, own) = send(app(), ask("c1")).await;
    assert_eq!(own["allowed"], true);
    assert_eq!(own["action"], "manageClub");
    let (_, other) = send(app(), ask("c2")).await;
    assert_eq!(other["allowed"], false);
}

#[tokio::test]
async fn admin_sensitive_data_scenario() {
    let token = token_for(&User::new("a1", Role::Admin));
    let ask = |role: &str| {
        json_request(
            "POST",
            "/api/v1/authz/check",
            Some(&token),
            json!({ "action": "viewSensitiveData", "target": { "id": "t1", "role": role } }),
        )
    };
    let (_, admin_target) = send(app(), ask("ADMIN")).await;
    assert_eq!(admin_target["allowed"], false);
    let (_, member_target) = send(app(), ask("MEMBER")).await;
    assert_eq!(member_target["allowed"], true);
    let (_, teacher_target) = send(app(), ask("TEACHER")).await;
    assert_eq!(teacher_target["allowed"], true);
}

#[tokio::test]
async fn dev_team_hidden_from_listed_member() {
    let club = json!({ "id": "c9", "name": " Dev  Team ", "isHidden": false, "memberIds": ["m1"] });
    let member = token_for(&User::new("m1", Role::Member).joined("c9"));
    let dev = token_for(&User::new("d1", Role::Dev));

    let check = json!({ "action": "accessRestrictedClub", "club": club });
    let (_, body) = send(app(), json_request("POST", "/api/v1/authz/check", Some(&member), check.clone())).await;
    assert_eq!(body["allowed"], false);
    let (_, body) = send(app(), json_request("POST", "/api/v1/authz/check", Some(&dev), check)).await;
    assert_eq!(body["allowed"], true);
}

#[tokio::test]
async fn unknown_action_is_a_client_error() {
    let (status, _) = send(
        app(),
        json_request("POST", "/api/v1/authz/check", None, json!({ "action": "launchRockets" })),
    )
    .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn non_string_stored_role_is_treated_as_member() {
    let token = token_for(&User::new("a1", Role::Admin));
    let check = json!({ "action": "manageUser", "target": { "id": "u1", "role": 7 } });
    let (status, body) = send(app(), json_request("POST", "/api/v1/authz/check", Some(&token), check)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], true);
}

#[tokio::test]
async fn rate_limit_is_per_user_behind_shared_address() {
    let mut config = Config::for_secret(SECRET);
    config.rate_limit.max_requests = 1;
    let app = app_with(config);
    let alice = token_for(&User::new("alice", Role::Member));
    let bob = token_for(&User::new("bob", Role::Member));

    let (status, _) = send(app.clone(), get_request("/api/v1/authz/capabilities", Some(&alice))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(app.clone(), get_request("/api/v1/authz/capabilities", Some(&bob))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(app, get_request("/api/v1/authz/capabilities", Some(&alice))).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Too many requests");
}

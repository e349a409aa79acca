use serde_json::json;

use crate::common::{JWT_SECRET, TestApp, routes};

mod login {
    use super::*;

    #[tokio::test]
    async fn registered_user_can_login_and_receives_token() {
        let app = TestApp::spawn().await;
        let reg = app
            .post_without_token(
                routes::USERS,
                &json!({"username": "mluukkai", "name": "Matti Luukkainen", "password": "salainen"}),
            )
            .await;
        assert_eq!(reg.status, 201, "Registration failed: {}", reg.text);

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "mluukkai", "password": "salainen"}),
            )
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body["token"].is_string());
        assert_eq!(res.body["username"], "mluukkai");
        assert_eq!(res.body["name"], "Matti Luukkainen");
    }

    #[tokio::test]
    async fn token_carries_the_user_id() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("mluukkai", "salainen").await;
        let users = app.get(routes::USERS).await;

        let claims = bloglist_server::utils::jwt::verify(&token, JWT_SECRET).unwrap();

        assert_eq!(i64::from(claims.uid), users.body[0]["id"].as_i64().unwrap());
        assert_eq!(claims.sub, "mluukkai");
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("mluukkai", "salainen").await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "mluukkai", "password": "wrong"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["error"], "invalid username or password");
    }

    #[tokio::test]
    async fn unknown_user_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "nobody", "password": "whatever"}),
            )
            .await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn blank_credentials_are_rejected() {
        let app = TestApp::spawn().await;

        let res = app.post_without_token(routes::LOGIN, &json!({})).await;

        assert_eq!(res.status, 401);
    }
}

mod bearer_token {
    use super::*;

    #[tokio::test]
    async fn token_without_bearer_prefix_is_invalid() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("mluukkai", "salainen").await;

        let res = app
            .client
            .post(format!("http://{}{}", app.addr, routes::BLOGS))
            .header("Authorization", token)
            .json(&json!({"title": "t", "url": "https://example.com"}))
            .send()
            .await
            .expect("Failed to send POST request");

        assert_eq!(res.status().as_u16(), 401);
        assert_eq!(app.blog_count().await, 0);
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_invalid() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("mluukkai", "salainen").await;
        let forged = bloglist_server::utils::jwt::sign(1, "mluukkai", "other-secret", 1).unwrap();

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({"title": "t", "url": "https://example.com"}),
                &forged,
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(app.blog_count().await, 0);
    }
}

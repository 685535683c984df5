// src/handlers/posts.rs
// Posts endpoints

use actix_web::{web, HttpResponse};

use crate::cache::PostCache;
use crate::database::PostStore;
use crate::error::ServiceError;
use crate::models::{CreatedResponse, NewPost};
use crate::service::PostService;

pub async fn list_posts<S: PostStore, C: PostCache>(
    service: web::Data<PostService<S, C>>,
) -> Result<HttpResponse, ServiceError> {
    let posts = service.list().await?;
    Ok(HttpResponse::Ok().json(posts))
}

pub async fn get_post<S: PostStore, C: PostCache>(
    service: web::Data<PostService<S, C>>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ServiceError> {
    let post = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn create_post<S: PostStore, C: PostCache>(
    service: web::Data<PostService<S, C>>,
    request: web::Json<NewPost>,
) -> Result<HttpResponse, ServiceError> {
    let post = service.create(&request).await?;
    Ok(HttpResponse::Created().json(CreatedResponse {
        message: "Post created".to_string(),
        data: post,
    }))
}

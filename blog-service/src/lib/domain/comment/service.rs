use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::Comment;
use crate::domain::comment::models::CommentId;
use crate::domain::comment::models::CreateCommentCommand;
use crate::domain::comment::ports::CommentRepository;
use crate::domain::comment::ports::CommentServicePort;
use crate::domain::post::models::PostAuthor;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostRepository;

/// Domain service for comments. Needs the post repository to confirm the
/// target post exists.
pub struct CommentService<CR, PR>
where
    CR: CommentRepository,
    PR: PostRepository,
{
    comments: Arc<CR>,
    posts: Arc<PR>,
}

impl<CR, PR> CommentService<CR, PR>
where
    CR: CommentRepository,
    PR: PostRepository,
{
    pub fn new(comments: Arc<CR>, posts: Arc<PR>) -> Self {
        Self { comments, posts }
    }

    async fn ensure_post_exists(&self, post_id: &PostId) -> Result<(), CommentError> {
        match self.posts.find_by_id(post_id).await? {
            Some(_) => Ok(()),
            None => Err(CommentError::PostNotFound(post_id.to_string())),
        }
    }
}

#[async_trait]
impl<CR, PR> CommentServicePort for CommentService<CR, PR>
where
    CR: CommentRepository,
    PR: PostRepository,
{
    async fn add_comment(
        &self,
        post_id: &PostId,
        command: CreateCommentCommand,
        author: PostAuthor,
    ) -> Result<Comment, CommentError> {
        self.ensure_post_exists(post_id).await?;

        let comment = Comment {
            id: CommentId::new(),
            post_id: *post_id,
            author,
            content: command.content,
            created_at: Utc::now(),
        };

        let comment = self.comments.create(comment).await?;

        tracing::info!(comment_id = %comment.id, post_id = %post_id, "Comment added");
        Ok(comment)
    }

    async fn list_comments(&self, post_id: &PostId) -> Result<Vec<Comment>, CommentError> {
        self.ensure_post_exists(post_id).await?;
        Ok(self.comments.find_by_post(post_id).await?)
    }

    async fn comments_for_posts(
        &self,
        post_ids: &[PostId],
    ) -> Result<HashMap<PostId, Vec<Comment>>, CommentError> {
        let mut grouped: HashMap<PostId, Vec<Comment>> =
            post_ids.iter().map(|id| (*id, Vec::new())).collect();
        if post_ids.is_empty() {
            return Ok(grouped);
        }

        for comment in self.comments.find_by_posts(post_ids).await? {
            grouped.entry(comment.post_id).or_default().push(comment);
        }

        Ok(grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::comment::models::CommentContent;
    use crate::domain::comment::ports::MockCommentRepository;
    use crate::domain::post::models::Post;
    use crate::domain::post::models::PostContent;
    use crate::domain::post::models::PostTitle;
    use crate::domain::post::ports::MockPostRepository;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::Username;

    fn author(name: &str) -> PostAuthor {
        PostAuthor {
            id: UserId::new(),
            username: Username::new(name.to_string()).unwrap(),
        }
    }

    fn existing_post(id: PostId) -> Post {
        Post {
            id,
            title: PostTitle::new("A post title".to_string()).unwrap(),
            content: PostContent::new("Body of the post".to_string()).unwrap(),
            author: author("alice"),
            created_at: Utc::now(),
        }
    }

    fn comment_on(post_id: PostId, content: &str) -> Comment {
        Comment {
            id: CommentId::new(),
            post_id,
            author: author("bob"),
            content: CommentContent::new(content.to_string()).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_add_comment_to_existing_post() {
        let post_id = PostId::new();

        let mut posts = MockPostRepository::new();
        posts
            .expect_find_by_id()
            .withf(move |id| *id == post_id)
            .times(1)
            .returning(move |id| Ok(Some(existing_post(*id))));

        let mut comments = MockCommentRepository::new();
        comments
            .expect_create()
            .withf(move |comment| comment.post_id == post_id)
            .times(1)
            .returning(|comment| Ok(comment));

        let service = CommentService::new(Arc::new(comments), Arc::new(posts));

        let command = CreateCommentCommand {
            content: CommentContent::new("Nice post!".to_string()).unwrap(),
        };
        let comment = service
            .add_comment(&post_id, command, author("bob"))
            .await
            .unwrap();

        assert_eq!(comment.author.username.as_str(), "bob");
        assert_eq!(comment.content.as_str(), "Nice post!");
    }

    #[tokio::test]
    async fn test_add_comment_to_missing_post() {
        let mut posts = MockPostRepository::new();
        posts.expect_find_by_id().times(1).returning(|_| Ok(None));

        let mut comments = MockCommentRepository::new();
        comments.expect_create().never();

        let service = CommentService::new(Arc::new(comments), Arc::new(posts));

        let command = CreateCommentCommand {
            content: CommentContent::new("Nice post!".to_string()).unwrap(),
        };
        let result = service
            .add_comment(&PostId::new(), command, author("bob"))
            .await;

        assert!(matches!(result, Err(CommentError::PostNotFound(_))));
    }

    #[tokio::test]
    async fn test_comments_for_posts_groups_by_post() {
        let first = PostId::new();
        let second = PostId::new();
        let empty = PostId::new();

        let mut posts = MockPostRepository::new();
        posts.expect_find_by_id().never();

        let mut comments = MockCommentRepository::new();
        comments
            .expect_find_by_posts()
            .withf(move |ids| ids.to_vec() == vec![first, second, empty])
            .times(1)
            .returning(move |_| {
                Ok(vec![
                    comment_on(first, "First!"),
                    comment_on(second, "Agreed."),
                    comment_on(first, "Second!"),
                ])
            });

        let service = CommentService::new(Arc::new(comments), Arc::new(posts));
        let grouped = service
            .comments_for_posts(&[first, second, empty])
            .await
            .unwrap();

        let contents = |id: &PostId| -> Vec<String> {
            grouped[id]
                .iter()
                .map(|c| c.content.as_str().to_string())
                .collect()
        };
        assert_eq!(contents(&first), vec!["First!", "Second!"]);
        assert_eq!(contents(&second), vec!["Agreed."]);
        assert!(grouped[&empty].is_empty());
    }

    #[tokio::test]
    async fn test_comments_for_no_posts_skips_store() {
        let mut comments = MockCommentRepository::new();
        comments.expect_find_by_posts().never();

        let posts = MockPostRepository::new();
        let service = CommentService::new(Arc::new(comments), Arc::new(posts));

        assert!(service.comments_for_posts(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_comments_for_missing_post() {
        let mut posts = MockPostRepository::new();
        posts.expect_find_by_id().times(1).returning(|_| Ok(None));

        let mut comments = MockCommentRepository::new();
        comments.expect_find_by_post().never();

        let service = CommentService::new(Arc::new(comments), Arc::new(posts));

        assert!(matches!(
            service.list_comments(&PostId::new()).await,
            Err(CommentError::PostNotFound(_))
        ));
    }
}

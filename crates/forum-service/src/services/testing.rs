//! In-memory repositories for service tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use forum_common::auth::{hash_password, JwtService, Session};
use forum_core::traits::{
    CommentRepository, PostRepository, RepoResult, UserRepository, VoteRepository,
};
use forum_core::{
    Comment, DomainError, Id, NewComment, NewPost, NewUser, Page, PageRequest, Post, PostSort,
    PostUpdate, Role, SubjectKind, User, VoteDirection, VoteSubject, VoteTally, VoteTransition,
};

use super::context::ServiceContext;

pub(crate) const TEST_SECRET: &str = "service-test-secret";
pub(crate) const TEST_PASSWORD: &str = "password123";

#[derive(Default)]
struct State {
    next_id: i64,
    users: Vec<(User, String)>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    votes: HashMap<(VoteSubject, Id), VoteDirection>,
}

impl State {
    fn next_id(&mut self) -> Id {
        self.next_id += 1;
        Id::new(self.next_id)
    }

    fn username_of(&self, id: Id) -> String {
        self.users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(u, _)| u.username.clone())
            .unwrap_or_default()
    }

    fn with_comment_count(&self, post: &Post) -> Post {
        let mut post = post.clone();
        post.comment_count = self
            .comments
            .iter()
            .filter(|c| c.post_id == post.id)
            .count() as i64;
        post
    }

    fn counters_mut(&mut self, subject: VoteSubject) -> Option<(&mut i32, &mut i32)> {
        match subject.kind {
            SubjectKind::Post => self
                .posts
                .iter_mut()
                .find(|p| p.id == subject.id)
                .map(|p| (&mut p.upvotes, &mut p.downvotes)),
            SubjectKind::Comment => self
                .comments
                .iter_mut()
                .find(|c| c.id == subject.id)
                .map(|c| (&mut c.upvotes, &mut c.downvotes)),
        }
    }
}

/// Single store implementing every repository trait
#[derive(Clone, Default)]
pub(crate) struct InMemoryForum {
    state: Arc<Mutex<State>>,
}

impl InMemoryForum {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub(crate) fn context(&self) -> ServiceContext {
        ServiceContext::builder()
            .user_repo(Arc::new(self.clone()))
            .post_repo(Arc::new(self.clone()))
            .comment_repo(Arc::new(self.clone()))
            .vote_repo(Arc::new(self.clone()))
            .jwt_service(Arc::new(JwtService::new(TEST_SECRET, 3600)))
            .build()
            .unwrap()
    }

    /// Insert a user with [`TEST_PASSWORD`] and return its session
    pub(crate) async fn seed_user(&self, username: &str, role: Role) -> Session {
        let user = UserRepository::create(
            self,
            &NewUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: hash_password(TEST_PASSWORD).unwrap(),
                role,
            },
        )
        .await
        .unwrap();
        Session {
            user_id: user.id,
            username: user.username,
            role: user.role,
        }
    }

    pub(crate) async fn seed_post(&self, owner: &Session, title: &str) -> Id {
        PostRepository::create(
            self,
            &NewPost {
                user_id: owner.user_id,
                title: title.to_string(),
                content: format!("{title} body"),
            },
        )
        .await
        .unwrap()
        .id
    }

    pub(crate) async fn seed_comment(&self, owner: &Session, post_id: Id, content: &str) -> Id {
        CommentRepository::create(
            self,
            &NewComment {
                post_id,
                user_id: owner.user_id,
                content: content.to_string(),
            },
        )
        .await
        .unwrap()
        .id
    }

    pub(crate) fn vote_rows(&self) -> usize {
        self.state().votes.len()
    }

    pub(crate) fn comment_rows(&self) -> usize {
        self.state().comments.len()
    }
}

fn paginate<T: Clone>(items: &[T], page: PageRequest) -> Page<T> {
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(0);
    let slice = items.iter().skip(offset).take(limit).cloned().collect();
    Page::new(slice, items.len() as i64, page)
}

#[async_trait]
impl UserRepository for InMemoryForum {
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<User>> {
        Ok(self.state().users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .state()
            .users
            .iter()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn username_exists(&self, username: &str, excluding: Option<Id>) -> RepoResult<bool> {
        Ok(self
            .state()
            .users
            .iter()
            .any(|(u, _)| u.username == username && Some(u.id) != excluding))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.state().users.iter().any(|(u, _)| u.email == email))
    }

    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let mut state = self.state();
        if state.users.iter().any(|(u, _)| u.username == user.username) {
            return Err(DomainError::UsernameTaken);
        }
        if state.users.iter().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        let id = state.next_id();
        let mut created = User::new(id, user.username.clone(), user.email.clone());
        created.role = user.role;
        state.users.push((created.clone(), user.password_hash.clone()));
        Ok(created)
    }

    async fn update_username(&self, id: Id, username: &str) -> RepoResult<User> {
        let mut state = self.state();
        if state.users.iter().any(|(u, _)| u.username == username && u.id != id) {
            return Err(DomainError::UsernameTaken);
        }
        let (user, _) = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.set_username(username.to_string());
        Ok(user.clone())
    }

    async fn get_password_hash(&self, id: Id) -> RepoResult<Option<String>> {
        Ok(self.state().users.iter().find(|(u, _)| u.id == id).map(|(_, h)| h.clone()))
    }

    async fn update_password(&self, id: Id, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state();
        let (_, hash) = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        *hash = password_hash.to_string();
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> RepoResult<Page<User>> {
        let users: Vec<User> = self.state().users.iter().map(|(u, _)| u.clone()).collect();
        Ok(paginate(&users, page))
    }
}

#[async_trait]
impl PostRepository for InMemoryForum {
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Post>> {
        let state = self.state();
        Ok(state
            .posts
            .iter()
            .find(|p| p.id == id)
            .map(|p| state.with_comment_count(p)))
    }

    async fn exists(&self, id: Id) -> RepoResult<bool> {
        Ok(self.state().posts.iter().any(|p| p.id == id))
    }

    async fn list(&self, page: PageRequest, sort: PostSort) -> RepoResult<Page<Post>> {
        let state = self.state();
        let mut posts: Vec<Post> = state.posts.iter().map(|p| state.with_comment_count(p)).collect();
        // Newest (highest id) first, then a stable sort on the requested key
        posts.sort_by(|a, b| b.id.cmp(&a.id));
        match sort {
            PostSort::Recent => {}
            PostSort::Upvotes => posts.sort_by(|a, b| b.upvotes.cmp(&a.upvotes)),
            PostSort::Downvotes => posts.sort_by(|a, b| b.downvotes.cmp(&a.downvotes)),
            PostSort::CommentCount => posts.sort_by(|a, b| b.comment_count.cmp(&a.comment_count)),
        }
        Ok(paginate(&posts, page))
    }

    async fn create(&self, post: &NewPost) -> RepoResult<Post> {
        let mut state = self.state();
        let id = state.next_id();
        let created = Post {
            id,
            user_id: post.user_id,
            author_username: state.username_of(post.user_id),
            title: post.title.clone(),
            content: post.content.clone(),
            upvotes: 0,
            downvotes: 0,
            comment_count: 0,
            created_at: Utc::now(),
            updated_at: None,
        };
        state.posts.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: Id, update: &PostUpdate) -> RepoResult<Post> {
        let mut state = self.state();
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::PostNotFound(id))?;
        post.title.clone_from(&update.title);
        post.content.clone_from(&update.content);
        post.updated_at = Some(Utc::now());
        let post = post.clone();
        Ok(state.with_comment_count(&post))
    }

    async fn delete(&self, id: Id) -> RepoResult<()> {
        let mut state = self.state();
        if !state.posts.iter().any(|p| p.id == id) {
            return Err(DomainError::PostNotFound(id));
        }
        let doomed: Vec<Id> = state
            .comments
            .iter()
            .filter(|c| c.post_id == id)
            .map(|c| c.id)
            .collect();
        state.votes.retain(|(subject, _), _| match subject.kind {
            SubjectKind::Post => subject.id != id,
            SubjectKind::Comment => !doomed.contains(&subject.id),
        });
        state.comments.retain(|c| c.post_id != id);
        state.posts.retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryForum {
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Comment>> {
        Ok(self.state().comments.iter().find(|c| c.id == id).cloned())
    }

    async fn list_by_post(&self, post_id: Id, page: PageRequest) -> RepoResult<Page<Comment>> {
        let all = self.list_all_by_post(post_id).await?;
        Ok(paginate(&all, page))
    }

    async fn list_all_by_post(&self, post_id: Id) -> RepoResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .state()
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| {
            b.upvotes
                .cmp(&a.upvotes)
                .then(b.created_at.cmp(&a.created_at))
                .then(b.id.cmp(&a.id))
        });
        Ok(comments)
    }

    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        let mut state = self.state();
        if !state.posts.iter().any(|p| p.id == comment.post_id) {
            return Err(DomainError::PostNotFound(comment.post_id));
        }
        let id = state.next_id();
        let created = Comment {
            id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            author_username: state.username_of(comment.user_id),
            content: comment.content.clone(),
            upvotes: 0,
            downvotes: 0,
            created_at: Utc::now(),
        };
        state.comments.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: Id) -> RepoResult<()> {
        let mut state = self.state();
        if !state.comments.iter().any(|c| c.id == id) {
            return Err(DomainError::CommentNotFound(id));
        }
        state
            .votes
            .retain(|(subject, _), _| *subject != VoteSubject::comment(id));
        state.comments.retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl VoteRepository for InMemoryForum {
    async fn apply_vote(
        &self,
        subject: VoteSubject,
        voter_id: Id,
        direction: VoteDirection,
    ) -> RepoResult<VoteTally> {
        let mut state = self.state();
        let current = state.votes.get(&(subject, voter_id)).copied();
        let transition = VoteTransition::plan(current, direction);

        let (up, down) = state.counters_mut(subject).ok_or(match subject.kind {
            SubjectKind::Post => DomainError::PostNotFound(subject.id),
            SubjectKind::Comment => DomainError::CommentNotFound(subject.id),
        })?;
        *up += transition.upvote_delta;
        *down += transition.downvote_delta;
        let tally = VoteTally {
            upvotes: *up,
            downvotes: *down,
            viewer_vote: transition.next,
        };

        match transition.next {
            Some(next) => state.votes.insert((subject, voter_id), next),
            None => state.votes.remove(&(subject, voter_id)),
        };
        Ok(tally)
    }

    async fn find_direction(
        &self,
        subject: VoteSubject,
        voter_id: Id,
    ) -> RepoResult<Option<VoteDirection>> {
        Ok(self.state().votes.get(&(subject, voter_id)).copied())
    }
}

use log::{error, trace};

use crate::api::{AuthApi, CatalogApi};
use crate::error::Error;
use crate::models::{Book, LoginCredentials, RegisterCredentials, User};

/// Application-wide authentication state, passed explicitly to whatever
/// needs the signed-in identity instead of being read from a global.
///
/// Where the token came from and where it goes between runs is the
/// embedding application's business, this context only holds it in memory.
pub struct AuthContext<A> {
    api: A,
    user: Option<User>,
    token: Option<String>,
}

impl<A: AuthApi> AuthContext<A> {
    pub fn new(api: A) -> AuthContext<A> {
        AuthContext {
            api,
            user: None,
            token: None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<(), Error> {
        trace!("AuthContext::login()");

        let response = self.api.login(credentials).await?;

        self.token = Some(response.token);
        self.user = Some(response.user);

        Ok(())
    }

    pub async fn register(&mut self, credentials: &RegisterCredentials) -> Result<(), Error> {
        trace!("AuthContext::register()");

        let response = self.api.register(credentials).await?;

        self.token = Some(response.token);
        self.user = Some(response.user);

        Ok(())
    }

    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
    }

    /// Hands a token kept by the embedding application back to the context,
    /// ahead of a `check_token` on startup.
    pub fn restore_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Revalidates the held token. No token is a quiet no-op, a rejected
    /// token signs the context out.
    pub async fn check_token(&mut self) {
        trace!("AuthContext::check_token()");

        let token = match &self.token {
            Some(token) => token.clone(),
            None => return,
        };

        match self.api.validate_token(&token).await {
            Ok(user) => self.user = Some(user),
            Err(err) => {
                error!("token validation failed: {}", err);
                self.token = None;
                self.user = None;
            }
        }
    }
}

/// Search-result list shared across pages. A failed search keeps the
/// previous list on screen.
pub struct BookContext<C> {
    catalog: C,
    books: Vec<Book>,
    loading: bool,
}

impl<C: CatalogApi> BookContext<C> {
    pub fn new(catalog: C) -> BookContext<C> {
        BookContext {
            catalog,
            books: vec![],
            loading: true,
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub async fn fetch_books(&mut self, query: &str) {
        trace!("BookContext::fetch_books()");

        self.loading = true;

        match self.catalog.search(query).await {
            Ok(books) => self.books = books,
            Err(err) => error!("book search failed: {}", err),
        }

        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use crate::api::{AuthApi, CatalogApi};
    use crate::error::Error;
    use crate::models::{
        AuthResponse, Book, BookRecord, LoginCredentials, RegisterCredentials, User,
    };

    use super::{AuthContext, BookContext};

    struct FakeAuth {
        accept: bool,
    }

    fn user() -> User {
        User {
            id: 7,
            name: String::from("Test Reader"),
            email: String::from("reader@example.com"),
        }
    }

    #[async_trait]
    impl AuthApi for FakeAuth {
        async fn login(&self, _credentials: &LoginCredentials) -> Result<AuthResponse, Error> {
            if !self.accept {
                return Err(Error::Status {
                    url: String::from("fake://users/login"),
                    status: 401,
                });
            }

            Ok(AuthResponse {
                user: user(),
                token: String::from("tok-1"),
            })
        }

        async fn register(&self, _credentials: &RegisterCredentials) -> Result<AuthResponse, Error> {
            Ok(AuthResponse {
                user: user(),
                token: String::from("tok-2"),
            })
        }

        async fn validate_token(&self, token: &str) -> Result<User, Error> {
            if self.accept && token == "tok-1" {
                return Ok(user());
            }

            Err(Error::Status {
                url: String::from("fake://users/validate"),
                status: 401,
            })
        }
    }

    struct FakeCatalog {
        fail: bool,
    }

    fn result_book(id: &str) -> Book {
        Book {
            id: id.to_string(),
            title: format!("Book {}", id),
            authors: vec![String::from("Some Author")],
            published_date: String::from("2001"),
            description: String::from("A description."),
            thumbnail: String::new(),
            small_thumbnail: String::new(),
        }
    }

    #[async_trait]
    impl CatalogApi for FakeCatalog {
        async fn fetch_book(&self, id: &str) -> Result<BookRecord, Error> {
            Ok(BookRecord {
                book: result_book(id),
                rating: None,
            })
        }

        async fn search(&self, query: &str) -> Result<Vec<Book>, Error> {
            if self.fail {
                return Err(Error::Status {
                    url: String::from("fake://catalog/volumes"),
                    status: 500,
                });
            }

            Ok(vec![result_book(&format!("{}-1", query))])
        }
    }

    #[tokio::test]
    async fn login_stores_user_and_token() -> anyhow::Result<()> {
        let mut auth = AuthContext::new(FakeAuth { accept: true });

        auth.login(&LoginCredentials {
            email: String::from("reader@example.com"),
            password: String::from("hunter2"),
        })
        .await?;

        assert_eq!(Some("tok-1"), auth.token());
        assert_eq!("Test Reader", auth.user().unwrap().name);

        Ok(())
    }

    #[tokio::test]
    async fn failed_login_leaves_the_context_signed_out() -> anyhow::Result<()> {
        let mut auth = AuthContext::new(FakeAuth { accept: false });

        let r = auth
            .login(&LoginCredentials {
                email: String::from("reader@example.com"),
                password: String::from("wrong"),
            })
            .await;

        assert_eq!(true, r.is_err());
        assert_eq!(None, auth.user());
        assert_eq!(None, auth.token());

        Ok(())
    }

    #[tokio::test]
    async fn logout_clears_both_slots() -> anyhow::Result<()> {
        let mut auth = AuthContext::new(FakeAuth { accept: true });

        auth.login(&LoginCredentials {
            email: String::from("reader@example.com"),
            password: String::from("hunter2"),
        })
        .await?;

        auth.logout();

        assert_eq!(None, auth.user());
        assert_eq!(None, auth.token());

        Ok(())
    }

    #[tokio::test]
    async fn check_token_restores_the_session() -> anyhow::Result<()> {
        let mut auth = AuthContext::new(FakeAuth { accept: true });

        auth.restore_token("tok-1");
        auth.check_token().await;

        assert_eq!("Test Reader", auth.user().unwrap().name);

        Ok(())
    }

    #[tokio::test]
    async fn rejected_token_signs_out() -> anyhow::Result<()> {
        let mut auth = AuthContext::new(FakeAuth { accept: true });

        auth.restore_token("stale");
        auth.check_token().await;

        assert_eq!(None, auth.user());
        assert_eq!(None, auth.token());

        Ok(())
    }

    #[tokio::test]
    async fn check_token_without_a_token_is_a_no_op() -> anyhow::Result<()> {
        let mut auth = AuthContext::new(FakeAuth { accept: true });

        auth.check_token().await;

        assert_eq!(None, auth.user());

        Ok(())
    }

    #[tokio::test]
    async fn fetch_books_fills_the_list() -> anyhow::Result<()> {
        let mut books = BookContext::new(FakeCatalog { fail: false });

        assert_eq!(true, books.is_loading());

        books.fetch_books("tolkien").await;

        assert_eq!(false, books.is_loading());
        assert_eq!(1, books.books().len());
        assert_eq!("tolkien-1", books.books()[0].id);

        Ok(())
    }

    #[tokio::test]
    async fn failed_search_keeps_the_previous_list() -> anyhow::Result<()> {
        let mut books = BookContext::new(FakeCatalog { fail: false });
        books.fetch_books("tolkien").await;

        let mut failing = BookContext {
            catalog: FakeCatalog { fail: true },
            books: books.books.clone(),
            loading: false,
        };

        failing.fetch_books("austen").await;

        assert_eq!(false, failing.is_loading());
        assert_eq!(1, failing.books().len());
        assert_eq!("tolkien-1", failing.books()[0].id);

        Ok(())
    }
}

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use cine_config::{Config, ConfigLoader};
use cine_core::{
    ApiClient, AuthSessionManager, FetchRequest, FetchStatus,
    FileSessionStore, MovieApi, MovieCatalogStore, MovieDetailsService,
    ProfileService, SessionStore,
};
use cine_model::{DiscoverQuery, MovieId};
use dialoguer::{Input, Password};
use tokio::io::BufReader;

use crate::browse;
use crate::cli::{CatalogArgs, Command};
use crate::render;

/// Wired-up services for one invocation.
struct App {
    config: Config,
    api: Arc<dyn MovieApi>,
    sessions: Arc<dyn SessionStore>,
}

impl App {
    fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = config_path {
            loader = loader.with_config_path(path);
        }
        let config = loader.load().context("failed to load configuration")?;
        let api = ApiClient::from_config(&config.api)
            .context("failed to create API client")?;
        let sessions = FileSessionStore::from_config(&config.session)
            .context("failed to open session store")?;
        Ok(Self {
            config,
            api: Arc::new(api),
            sessions: Arc::new(sessions),
        })
    }

    fn auth(&self) -> AuthSessionManager {
        AuthSessionManager::new(self.api.clone(), self.sessions.clone())
    }

    fn fetch_request(&self, args: &CatalogArgs) -> FetchRequest {
        FetchRequest::new(
            args.window
                .map(Into::into)
                .unwrap_or(self.config.catalog.time_window),
            args.language
                .clone()
                .unwrap_or_else(|| self.config.catalog.language.clone()),
        )
    }

    async fn fetched_catalog(
        &self,
        args: &CatalogArgs,
    ) -> Result<MovieCatalogStore> {
        let store = MovieCatalogStore::new(self.api.clone());
        if store.fetch_catalog(self.fetch_request(args)).await
            == FetchStatus::Failed
        {
            bail!(
                "failed to fetch trending movies: {}",
                store.last_error().unwrap_or_default()
            );
        }
        Ok(store)
    }
}

pub async fn run(command: Command, config_path: Option<&Path>) -> Result<()> {
    let app = App::load(config_path)?;

    match command {
        Command::Login { username, password } => {
            let username = match username {
                Some(username) => username,
                None => Input::<String>::new()
                    .with_prompt("Username")
                    .interact_text()?,
            };
            let password = match password {
                Some(password) => password,
                None => Password::new().with_prompt("Password").interact()?,
            };
            app.auth().login(&username, &password).await?;
            println!("Logged in as {}.", username.trim());
        }
        Command::Logout => {
            app.auth().logout().await?;
            println!("Logged out.");
        }
        Command::Status => {
            let auth = app.auth();
            if auth.restore().await? {
                println!("Logged in.");
            } else {
                println!("Not logged in.");
            }
        }
        Command::Trending { catalog, search } => {
            let store = app.fetched_catalog(&catalog).await?;
            if let Some(query) = search {
                store.set_search_query(query);
            }
            print!(
                "{}",
                render::movie_list(&store.filtered_movies(), |_| false)
            );
        }
        Command::Popular { page, language } => {
            let query = DiscoverQuery::popular(
                page,
                language.unwrap_or_else(|| app.config.catalog.language.clone()),
            );
            let result = app.api.discover_movies(&query).await?;
            print!("{}", render::movie_list(&result.results, |_| false));
            if result.total_pages > 0 {
                println!("Page {} of {}", result.page, result.total_pages);
            }
        }
        Command::Movie { id } => {
            let view = MovieDetailsService::new(app.api.clone())
                .load(MovieId(id))
                .await?;
            print!(
                "{}",
                render::details(&view, &app.config.api.image_base_url)
            );
        }
        Command::Rate { id, value } => {
            let rating = MovieDetailsService::new(app.api.clone())
                .rate(MovieId(id), value)
                .await?;
            println!("Rated {id}: {rating}");
        }
        Command::Unrate { id } => {
            MovieDetailsService::new(app.api.clone())
                .clear_rating(MovieId(id))
                .await?;
            println!("Removed rating for {id}.");
        }
        Command::Profile => {
            let account = ProfileService::new(app.api.clone(), app.sessions.clone())
                .load()
                .await?;
            print!("{}", render::profile(&account));
        }
        Command::Browse { catalog } => {
            let store = app.fetched_catalog(&catalog).await?;
            let stdin = BufReader::new(tokio::io::stdin());
            browse::run(&store, stdin, std::io::stdout()).await?;
        }
    }
    Ok(())
}

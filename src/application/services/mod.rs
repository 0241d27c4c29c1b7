// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{catalog::CatalogCommandService, users::UserCommandService},
        ports::{
            security::{PasswordHasher, TokenManager},
            time::Clock,
        },
        queries::{catalog::CatalogQueryService, users::UserQueryService},
    },
    domain::{
        catalog::{
            AuthorFields, CatalogFields, CatalogReferenceChecker, CatalogRepository, EditionFields,
            GameFields, GameLicenseFields, GameSystemFields, ProductFields, PublisherFields,
        },
        slug::{SlugGenerator, SlugService},
        user::{Timezone, UserRepository},
    },
};

/// Storage for every catalog kind.
pub struct CatalogRepositories {
    pub licenses: Arc<dyn CatalogRepository<GameLicenseFields>>,
    pub publishers: Arc<dyn CatalogRepository<PublisherFields>>,
    pub authors: Arc<dyn CatalogRepository<AuthorFields>>,
    pub systems: Arc<dyn CatalogRepository<GameSystemFields>>,
    pub games: Arc<dyn CatalogRepository<GameFields>>,
    pub editions: Arc<dyn CatalogRepository<EditionFields>>,
    pub products: Arc<dyn CatalogRepository<ProductFields>>,
    pub references: Arc<dyn CatalogReferenceChecker>,
}

/// Ports every catalog kind's services share.
struct SharedCatalogPorts {
    references: Arc<dyn CatalogReferenceChecker>,
    slug_service: Arc<SlugService>,
    clock: Arc<dyn Clock>,
}

pub struct CatalogHandles<F: CatalogFields> {
    pub commands: Arc<CatalogCommandService<F>>,
    pub queries: Arc<CatalogQueryService<F>>,
}

impl<F: CatalogFields> CatalogHandles<F> {
    fn new(
        repo: Arc<dyn CatalogRepository<F>>,
        shared: &SharedCatalogPorts,
    ) -> Self {
        Self {
            commands: Arc::new(CatalogCommandService::new(
                Arc::clone(&repo),
                Arc::clone(&shared.references),
                Arc::clone(&shared.slug_service),
                Arc::clone(&shared.clock),
            )),
            queries: Arc::new(CatalogQueryService::new(repo)),
        }
    }
}

impl<F: CatalogFields> Clone for CatalogHandles<F> {
    fn clone(&self) -> Self {
        Self {
            commands: Arc::clone(&self.commands),
            queries: Arc::clone(&self.queries),
        }
    }
}

/// Access to the services of catalog kind `F`.
pub trait CatalogServiceFor<F: CatalogFields> {
    fn catalog(&self) -> &CatalogHandles<F>;
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    licenses: CatalogHandles<GameLicenseFields>,
    publishers: CatalogHandles<PublisherFields>,
    authors: CatalogHandles<AuthorFields>,
    systems: CatalogHandles<GameSystemFields>,
    games: CatalogHandles<GameFields>,
    editions: CatalogHandles<EditionFields>,
    products: CatalogHandles<ProductFields>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        catalog: CatalogRepositories,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
        default_timezone: Timezone,
    ) -> Self {
        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&token_manager),
            Arc::clone(&clock),
            default_timezone,
        ));
        let user_queries = Arc::new(UserQueryService::new(Arc::clone(&user_repo)));

        let shared = SharedCatalogPorts {
            references: catalog.references,
            slug_service: Arc::new(SlugService::new(slugger)),
            clock,
        };

        Self {
            user_commands,
            user_queries,
            licenses: CatalogHandles::new(catalog.licenses, &shared),
            publishers: CatalogHandles::new(catalog.publishers, &shared),
            authors: CatalogHandles::new(catalog.authors, &shared),
            systems: CatalogHandles::new(catalog.systems, &shared),
            games: CatalogHandles::new(catalog.games, &shared),
            editions: CatalogHandles::new(catalog.editions, &shared),
            products: CatalogHandles::new(catalog.products, &shared),
            token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    pub fn catalog_for<F: CatalogFields>(&self) -> &CatalogHandles<F>
    where
        Self: CatalogServiceFor<F>,
    {
        CatalogServiceFor::<F>::catalog(self)
    }
}

macro_rules! catalog_service_for {
    ($($fields:ty => $field:ident),+ $(,)?) => {
        $(
            impl CatalogServiceFor<$fields> for ApplicationServices {
                fn catalog(&self) -> &CatalogHandles<$fields> {
                    &self.$field
                }
            }
        )+
    };
}

catalog_service_for! {
    GameLicenseFields => licenses,
    PublisherFields => publishers,
    AuthorFields => authors,
    GameSystemFields => systems,
    GameFields => games,
    EditionFields => editions,
    ProductFields => products,
}

use time::{Date, Month};

use crate::catalog::Catalog;

/// Six 1985 launches across three companies; rockets named in the rockets table below.
pub const MISSIONS_CSV: &str = "\
id,company,location,date,detail,rocket_status,cost,mission_status
2112,Arianespace,\"ELA-1, Guiana Space Centre, French Guiana, France\",\"Thu Sep 12, 1985\",\"Saturn IB | ECS 3, Spacenet 3\",StatusRetired,,Failure
2115,NASA,\"LC-39A, Kennedy Space Center, Florida, USA\",\"Tue Aug 27, 1985\",Saturn V | STS-51-I,StatusRetired,\"450.0 \",Success
2121,NASA,\"LC-39A, Kennedy Space Center, Florida, USA\",\"Thu Jul 25, 1985\",Saturn IB | STS-51-F,StatusRetired,\"450.0 \",Success
2124,Arianespace,\"ELV-1 (SLV), Guiana Space Centre, French Guiana, France\",\"Tue Jul 02, 1985\",Scout X-3 | Giotto,StatusRetired,,Success
2126,RVSN USSR,\"Site 45/1, Baikonur Cosmodrome, Kazakhstan\",\"Fri Jun 21, 1985\",Proton M | EPN 03.0694,StatusRetired,,Failure
2129,NASA,\"LC-39A, Kennedy Space Center, Florida, USA\",\"Mon Jun 17, 1985\",Saturn V | STS-51-G,StatusRetired,\"450.0 \",Success
";

pub const ROCKETS_CSV: &str = "\
id,name,wiki,height
293,Proton M,https://en.wikipedia.org/wiki/Proton-M,58.2 m
315,Saturn V,https://en.wikipedia.org/wiki/Saturn_V,110.6 m
314,Saturn IB,https://en.wikipedia.org/wiki/Saturn_IB,43.2 m
305,Rokot/Briz K,https://en.wikipedia.org/wiki/Rokot,
325,Scout X-3,,
";

/// Saturn V 2/2 successes, Saturn IB 0/2, Scout X-3 0/1.
pub const RELIABILITY_MISSIONS_CSV: &str = "\
id,company,location,date,detail,rocket_status,cost,mission_status
5000,NASA,\"LC-39A, Kennedy Space Center, Florida, USA\",\"Tue Aug 27, 1985\",Saturn V | STS-51-I,StatusRetired,\"450.0 \",Success
5001,NASA,\"LC-39A, Kennedy Space Center, Florida, USA\",\"Mon Jun 17, 1985\",Saturn V | STS-51-G,StatusRetired,\"450.0 \",Success
5002,NASA,\"LC-39A, Kennedy Space Center, Florida, USA\",\"Thu Sep 12, 1985\",Saturn IB | Something,StatusRetired,,Failure
5003,NASA,\"LC-39A, Kennedy Space Center, Florida, USA\",\"Wed Aug 28, 1985\",Saturn IB | SomethingElse,StatusRetired,,Partial Failure
5004,NASA,\"LC-39A, Kennedy Space Center, Florida, USA\",\"Thu Jul 25, 1985\",Scout X-3 | Whatever,StatusRetired,,Prelaunch Failure
";

pub const RELIABILITY_ROCKETS_CSV: &str = "\
id,name,wiki,height
2,Saturn IB,https://en.wikipedia.org/wiki/Saturn_IB,43.2
1,Saturn V,https://en.wikipedia.org/wiki/Saturn_V,110.6
3,Scout X-3,,
";

/// Ten 2019-2020 launches with distinct costs, shared locations and tied counts.
pub const QUERY_MISSIONS_CSV: &str = "\
id,company,location,date,detail,rocket_status,cost,mission_status
1,SpaceX,\"LC-39A, Kennedy Space Center, Florida, USA\",\"Fri Aug 07, 2020\",Falcon 9 Block 5 | Starlink V1 L9,StatusActive,\"50.0 \",Success
2,CASC,\"Site 9401 (SLS-2), Jiuquan Satellite Launch Center, China\",\"Thu Aug 06, 2020\",Long March 2D | Gaofen-9 04,StatusActive,\"29.75 \",Success
3,SpaceX,\"Pad A, Boca Chica, Texas, USA\",\"Tue Aug 04, 2020\",Starship Prototype | 150 Meter Hop,StatusActive,,Success
4,Roscosmos,\"Site 200/39, Baikonur Cosmodrome, Kazakhstan\",\"Thu Jul 30, 2020\",Proton-M/Briz-M | Ekspress-80 & Ekspress-103,StatusActive,\"65.0 \",Success
5,ULA,\"SLC-41, Cape Canaveral AFS, Florida, USA\",\"Thu Jul 30, 2020\",Atlas V 541 | Perseverance,StatusActive,\"145.0 \",Success
6,CASC,\"LC-9, Taiyuan Satellite Launch Center, China\",\"Sat Jul 25, 2020\",Long March 4B | Ziyuan-3 03,StatusActive,\"64.68 \",Success
7,Roscosmos,\"Site 31/6, Baikonur Cosmodrome, Kazakhstan\",\"Thu Jul 23, 2020\",Soyuz 2.1a | Progress MS-15,StatusActive,\"48.5 \",Success
8,ExPace,\"Site 95, Jiuquan Satellite Launch Center, China\",\"Fri Jul 10, 2020\",Kuaizhou 11 | Jilin-1 02E & CentiSpace-1 S2,StatusActive,\"28.3 \",Failure
9,CASC,\"Site 9401 (SLS-2), Jiuquan Satellite Launch Center, China\",\"Fri Jul 03, 2020\",Long March 4B | Gaofen Duomo & BY70-2,StatusActive,\"64.68 \",Success
10,Arianespace,\"ELA-3, Guiana Space Centre, French Guiana, France\",\"Wed Dec 18, 2019\",Soyuz ST-A/Fregat-M | CSG-1,StatusRetired,\"5,000.0\",Success
";

pub const QUERY_ROCKETS_CSV: &str = "\
id,name,wiki,height
1,Falcon 9 Block 5,https://en.wikipedia.org/wiki/Falcon_9,70.0 m
2,Long March 2D,https://en.wikipedia.org/wiki/Long_March_2D,41.06 m
3,Starship Prototype,https://en.wikipedia.org/wiki/SpaceX_Starship,
4,Proton-M/Briz-M,,58.2 m
5,Atlas V 541,https://en.wikipedia.org/wiki/Atlas_V,58.3 m
6,Long March 4B,https://en.wikipedia.org/wiki/Long_March_4B,45.8 m
7,Soyuz 2.1a,https://en.wikipedia.org/wiki/Soyuz-2,46.3 m
8,Kuaizhou 11,,
";

pub fn catalog(missions: Option<&str>, rockets: Option<&str>) -> Catalog {
    match Catalog::from_csv(missions, rockets) {
        Ok(catalog) => catalog,
        Err(err) => panic!("fixture catalog should load: {err}"),
    }
}

pub fn date(year: i32, month: Month, day: u8) -> Date {
    match Date::from_calendar_date(year, month, day) {
        Ok(date) => date,
        Err(err) => panic!("invalid fixture date {year}-{month}-{day}: {err}"),
    }
}
